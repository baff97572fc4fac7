// Prompt construction for plan generation.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::models::plan::PlanRequest;

/// Week count requested when the timeframe does not state one in weeks.
pub const DEFAULT_WEEK_COUNT: u32 = 4;

/// Plan prompt template.
/// Replace: {topic}, {difficulty}, {timeframe}, {week_count}, {json_only_instruction}
pub const PLAN_PROMPT_TEMPLATE: &str = r#"Generate a JSON learning plan for {topic} at {difficulty} level for {timeframe}.

Return ONLY valid JSON with this exact structure:
```json
{
  "title": "Learning Plan for {topic}",
  "topic": "{topic}",
  "difficulty": "{difficulty}",
  "duration": "{timeframe}",
  "weeks": [
    {
      "week": number,
      "focus": "string",
      "activities": [
        {
          "name": "string",
          "description": "string",
          "resources": ["string"]
        }
      ]
    }
  ],
  "resources": [
    {
      "name": "string",
      "type": "string",
      "url": "string"
    }
  ]
}
```
Include {week_count} weeks of content. {json_only_instruction}"#;

/// Number of weeks to ask for.
///
/// A leading integer is honoured only when the timeframe is expressed in
/// weeks ("6 weeks", "1 Week"); anything else ("a month", "3 months", "0 weeks")
/// gets [`DEFAULT_WEEK_COUNT`].
pub fn week_count(timeframe: &str) -> u32 {
    let trimmed = timeframe.trim_start();
    if !trimmed.to_ascii_lowercase().contains("week") {
        return DEFAULT_WEEK_COUNT;
    }

    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());

    match trimmed[..digits_end].parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => DEFAULT_WEEK_COUNT,
    }
}

/// Builds the model prompt for a validated request.
pub fn build_plan_prompt(request: &PlanRequest) -> String {
    let week_count = week_count(&request.timeframe).to_string();

    fill_template(PLAN_PROMPT_TEMPLATE, |name| match name {
        "topic" => Some(request.topic.as_str()),
        "difficulty" => Some(request.difficulty.as_str()),
        "timeframe" => Some(request.timeframe.as_str()),
        "week_count" => Some(week_count.as_str()),
        "json_only_instruction" => Some(JSON_ONLY_INSTRUCTION),
        _ => None,
    })
}

/// Substitutes `{name}` placeholders in one pass over the template.
/// Substituted values are never rescanned; unknown names and other braces
/// (the embedded JSON example) are copied through.
fn fill_template<'a>(template: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let value = after
            .find('}')
            .map(|close| &after[..close])
            .filter(|name| {
                !name.is_empty() && name.chars().all(|c| c.is_ascii_lowercase() || c == '_')
            })
            .and_then(|name| lookup(name).map(|value| (name.len(), value)));

        match value {
            Some((name_len, value)) => {
                out.push_str(value);
                rest = &after[name_len + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
