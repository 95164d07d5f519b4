//! 模板 actor：回显输入 payload，无副作用

use std::time::Duration;

use crate::actor::Actor;
use crate::payload::Payload;
use crate::protocol::to_display_json;

pub struct TemplateActor;

impl Actor for TemplateActor {
    fn name(&self) -> &'static str {
        "template"
    }

    fn started_message(&self) -> &'static str {
        "Template actor booted"
    }

    fn describe(&self, payload: &Payload) -> Vec<String> {
        vec![format!("Input payload: {}", to_display_json(&payload.as_value()))]
    }

    fn latency(&self) -> Duration {
        Duration::from_millis(100)
    }

    fn finished_message(&self) -> &'static str {
        "Template actor finished"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::decode;

    #[test]
    fn test_describe_echoes_payload() {
        let p = decode(r#"{"b":1,"a":"x"}"#).unwrap();
        assert_eq!(
            TemplateActor.describe(&p),
            vec![r#"Input payload: {"b": 1, "a": "x"}"#.to_string()]
        );
    }

    #[test]
    fn test_no_side_effect() {
        assert!(TemplateActor.side_effect().is_none());
    }
}
