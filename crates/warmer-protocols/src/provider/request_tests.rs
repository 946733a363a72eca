use super::*;

#[test]
fn test_chat_request_new() {
    let request = ChatRequest::new("You are helpful", "Reply to this");
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, ChatRole::System);
    assert_eq!(request.messages[1].role, ChatRole::User);
}

#[test]
fn test_chat_request_prompt() {
    let request = ChatRequest::new("system", "the prompt");
    assert_eq!(request.prompt(), Some("the prompt"));
}

#[test]
fn test_chat_role_serialization() {
    let json = serde_json::to_value(ChatMessage::system("x")).unwrap();
    assert_eq!(json["role"], "system");
    assert_eq!(ChatRole::Assistant.as_str(), "assistant");
}

#[test]
fn test_model_params_with_max_tokens() {
    let params = ModelParams::new("gpt-3.5-turbo", 0.7, 100).with_max_tokens(200);
    assert_eq!(params.max_tokens, 200);
    assert_eq!(params.model, "gpt-3.5-turbo");
}
