//! Prompt 构建服务
//!
//! 负责为文本转换构建 LLM 聊天消息

use crate::llm::ChatMessage;

/// 系统提示词模板，`{target}` 为转换对象
const SYSTEM_PROMPT: &str = r#"You rewrite messages so they are appropriate to send to a specific recipient.
The recipient is: {target}.

Rules:
1. Keep the original meaning and every concrete fact.
2. Adjust tone, politeness level and word choice to suit the recipient.
3. Reply in the same language as the original message.
4. Output only the rewritten message, without quotes or explanations."#;

/// Prompt 服务
pub struct PromptService;

impl PromptService {
    /// 创建新的 Prompt 服务
    pub fn new() -> Self {
        Self
    }

    /// 构建转换消息列表
    ///
    /// 原文整段作为用户消息发送，不做截断
    pub fn build_conversion_messages(&self, text: &str, target: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(SYSTEM_PROMPT.replace("{target}", target.trim())),
            ChatMessage::user(text),
        ]
    }
}

impl Default for PromptService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    #[test]
    fn test_build_conversion_messages() {
        let messages = PromptService::new().build_conversion_messages("내일 회의 취소", " 교수님 ");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains("The recipient is: 교수님."));
        assert_eq!(messages[1], ChatMessage::user("내일 회의 취소"));
    }

    #[test]
    fn test_long_text_is_sent_whole() {
        let text = "다음 주 일정 변경 안내. ".repeat(300);
        let messages = PromptService::new().build_conversion_messages(&text, "팀장님");

        assert!(text.chars().count() > 2000);
        assert_eq!(messages[1].content, text);
    }
}
