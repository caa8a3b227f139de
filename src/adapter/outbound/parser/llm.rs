//! LLM-powered set parser.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{normalize_exercise_name, ParsedSet};
use crate::error::{Error, Result};
use crate::port::outbound::llm::Llm;
use crate::port::outbound::parser::SetParser;

/// Extracts sets from free-form Russian speech with a language model.
pub struct LlmSetParser {
    llm: Arc<dyn Llm>,
}

impl LlmSetParser {
    /// Create a new parser over the given model.
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self { llm }
    }

    fn build_prompt(text: &str) -> String {
        format!(
            r#"Ты помощник для дневника тренировок. Пользователь надиктовал один подход.
Извлеки из текста упражнение, вес, количество повторений и комментарий.

## Текст
{text}

## Output (JSON only)
```json
{{
  "exercise": "жим лежа",
  "exercise_raw": "жим лёжа",
  "weight": 80,
  "reps": 5,
  "comment": "тяжело"
}}
```

Rules:
- "exercise": каноническое название упражнения в нижнем регистре, без веса и повторений
- "exercise_raw": упражнение так, как его назвал пользователь
- "weight": вес в килограммах числом, null если не назван
- "reps": целое число повторений, null если не названо
- "comment": всё остальное (самочувствие, техника), null если нет
- "80 на 5" значит вес 80 и 5 повторений
"#
        )
    }

    fn build_normalize_prompt(raw: &str) -> String {
        format!(
            r#"Приведи название упражнения из дневника тренировок к каноническому виду:
нижний регистр, без веса и повторений, общепринятое русское название.

Упражнение: {raw}

Ответь только названием, без пояснений."#
        )
    }
}

#[derive(Deserialize, Debug, Default)]
struct RawSet {
    #[serde(default)]
    exercise: Option<String>,
    #[serde(default)]
    exercise_raw: Option<String>,
    #[serde(default)]
    weight: Value,
    #[serde(default)]
    reps: Value,
    #[serde(default)]
    comment: Option<String>,
}

impl RawSet {
    /// A reply without an exercise name keeps the whole transcript as the name.
    fn into_parsed(self, text: &str) -> Result<ParsedSet> {
        let raw = self
            .exercise_raw
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| text.to_string());
        let exercise = self
            .exercise
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| text.to_string());

        let weight = lenient_number(&self.weight)
            .ok_or_else(|| Error::Parse(format!("weight is not a number: {}", self.weight)))?;
        let reps = match lenient_number(&self.reps)
            .ok_or_else(|| Error::Parse(format!("reps is not a number: {}", self.reps)))?
        {
            Some(r) if r.fract() == 0.0 && r <= f64::from(i32::MAX) && r >= f64::from(i32::MIN) => {
                Some(r as i32)
            }
            Some(r) => return Err(Error::Parse(format!("reps must be whole: {r}"))),
            None => None,
        };

        Ok(ParsedSet::try_new(&exercise, &raw, weight, reps, self.comment)?)
    }
}

/// Read a JSON number that may arrive as a string with a decimal comma.
///
/// `Some(None)` for null or blank, `None` if the value is not numeric.
fn lenient_number(value: &Value) -> Option<Option<f64>> {
    match value {
        Value::Null => Some(None),
        Value::Number(n) => n.as_f64().map(Some),
        Value::String(s) => {
            let s = s.trim().trim_end_matches("кг").trim();
            if s.is_empty() {
                Some(None)
            } else {
                s.replace(',', ".").parse::<f64>().ok().map(Some)
            }
        }
        _ => None,
    }
}

/// Find JSON in a markdown code block or take the outermost braces.
fn extract_json(text: &str) -> Result<&str> {
    if let Some(start) = text.find("```json") {
        let start = start + 7;
        let end = text[start..]
            .find("```")
            .map_or(text.len(), |i| start + i);
        Ok(text[start..end].trim())
    } else if let Some(start) = text.find('{') {
        let end = text.rfind('}').map_or(text.len(), |i| i + 1);
        if end <= start {
            return Err(Error::Parse("No JSON found in response".into()));
        }
        Ok(&text[start..end])
    } else {
        Err(Error::Parse("No JSON found in response".into()))
    }
}

/// Strip quotes and trailing punctuation a model may add around a bare name.
fn clean_name_reply(reply: &str) -> String {
    let line = reply.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    normalize_exercise_name(line.trim().trim_matches(|c: char| {
        matches!(c, '"' | '\'' | '«' | '»' | '`' | '.' | '*')
    }))
}

#[async_trait]
impl SetParser for LlmSetParser {
    async fn parse(&self, text: &str) -> Result<ParsedSet> {
        let prompt = Self::build_prompt(text);
        let response = self.llm.complete(&prompt).await?;
        debug!(provider = self.llm.name(), response = %response, "Parser response");

        let json = extract_json(&response)?;
        let raw: RawSet = serde_json::from_str(json)?;
        raw.into_parsed(text)
    }

    async fn normalize_exercise(&self, raw: &str) -> String {
        let fallback = normalize_exercise_name(raw);
        match self.llm.complete(&Self::build_normalize_prompt(raw)).await {
            Ok(reply) => {
                let name = clean_name_reply(&reply);
                if name.is_empty() {
                    fallback
                } else {
                    name
                }
            }
            Err(e) => {
                warn!(error = %e, "Exercise normalization failed, using local rules");
                fallback
            }
        }
    }
}
