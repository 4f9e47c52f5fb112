//! HTML rendering of the single page.
//!
//! All user and model text goes through [escape]. The API key is never written back into the page.

use grompt::canvas::OutputFormat;
use grompt::utils::llm::MODEL_PRESETS;
use grompt::Settings;

use crate::{OptimizeForm, Outcome, MAX_TOKENS_RANGE, TEMPERATURE_RANGE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; display: flex; }
aside { width: 18rem; padding: 1.5rem; background: #f4f4f6; min-height: 100vh; box-sizing: border-box; }
main { flex: 1; padding: 1.5rem 2.5rem; max-width: 56rem; }
label { display: block; margin: .75rem 0 .25rem; font-weight: 600; }
input, select, textarea { width: 100%; box-sizing: border-box; padding: .4rem; font: inherit; }
textarea { min-height: 5rem; }
fieldset { margin: 1rem 0; border: 1px solid #ddd; border-radius: .4rem; }
.row { display: flex; gap: 1rem; }
.row > div { flex: 1; }
.notice { padding: .75rem 1rem; border-radius: .4rem; margin: 1rem 0; }
.warning { background: #fff6d6; }
.error { background: #fde2e2; }
.info { background: #e3effd; }
.result { white-space: pre-wrap; background: #fafafa; border: 1px solid #ddd; padding: 1rem; border-radius: .4rem; }
button { margin-top: 1rem; padding: .6rem 1.2rem; font: inherit; }
"#;

/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn text_input(name: &str, label: &str, value: &str, placeholder: &str) -> String {
    format!(
        r#"<label for="{name}">{label}</label><input id="{name}" name="{name}" type="text" value="{}" placeholder="{}">"#,
        escape(value),
        escape(placeholder),
    )
}

fn text_area(name: &str, label: &str, value: &str, placeholder: &str) -> String {
    format!(
        r#"<label for="{name}">{label}</label><textarea id="{name}" name="{name}" placeholder="{}">{}</textarea>"#,
        escape(placeholder),
        escape(value),
    )
}

fn select(name: &str, label: &str, options: &[&str], selected: &str) -> String {
    let options: String = options
        .iter()
        .map(|option| {
            let marker = if *option == selected { " selected" } else { "" };
            format!(r#"<option value="{0}"{marker}>{0}</option>"#, escape(option))
        })
        .collect();
    format!(r#"<label for="{name}">{label}</label><select id="{name}" name="{name}">{options}</select>"#)
}

/// Model choices, keeping a configured or submitted model that is not a preset.
fn model_options<'a>(settings: &'a Settings, form: &'a OptimizeForm) -> Vec<&'a str> {
    let mut models: Vec<&str> = MODEL_PRESETS.to_vec();
    for extra in [settings.default_model.as_str(), form.model.trim()] {
        if !extra.is_empty() && !models.contains(&extra) {
            models.insert(0, extra);
        }
    }
    models
}

fn outcome_section(outcome: Option<&Outcome>) -> String {
    match outcome {
        None => String::new(),
        Some(Outcome::Optimized(optimized)) => format!(
            r#"<section id="result"><h2>Optimized Prompt:</h2><div class="result">{}</div></section>"#,
            escape(optimized)
        ),
        Some(Outcome::Warning(message)) => format!(r#"<div class="notice warning">{}</div>"#, escape(message)),
        Some(Outcome::Invalid(message)) | Some(Outcome::Failed(message)) => {
            format!(r#"<div class="notice error">{}</div>"#, escape(message))
        }
    }
}

/// Render the whole page, pre-filled with `form` and followed by the outcome of the last submission.
pub fn render(settings: &Settings, form: &OptimizeForm, outcome: Option<&Outcome>) -> String {
    let output_formats: Vec<&str> = OutputFormat::ALL.iter().map(OutputFormat::as_str).collect();
    let selected_format = match form.output_format.as_str() {
        "" => OutputFormat::default().as_str(),
        format => format,
    };
    let selected_model = match form.model.trim() {
        "" => settings.default_model.as_str(),
        model => model,
    };
    let temperature = match form.temperature.trim() {
        "" => settings.default_temperature.to_string(),
        value => value.to_string(),
    };
    let max_tokens = match form.max_tokens.trim() {
        "" => settings.default_max_tokens.to_string(),
        value => value.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Grompt - Prompt Optimizer</title>
<style>{STYLE}</style>
</head>
<body>
<form method="post" action="/optimize" style="display: contents">
<aside>
<h2>Configuration</h2>
<label for="api_key">Enter your GROQ API Key:</label>
<input id="api_key" name="api_key" type="password" autocomplete="off">
<hr>
<div class="notice info">Note: Your API key is used only for this request and is not stored. Always keep your API keys confidential.</div>
</aside>
<main>
<h1>Grompt - Prompt Optimizer</h1>
<p>Grompt uses Groq's LLM services to instantly optimize prompts.</p>
<fieldset>
<legend>Basic</legend>
{user_prompt}
</fieldset>
<fieldset>
<legend>Advanced (Prompt Canvas)</legend>
<div class="row"><div>{persona}</div><div>{audience}</div></div>
{task}
{steps}
{context}
{references}
<div class="row"><div>{output_format}</div><div>{tonality}</div></div>
{canvas_prompt}
</fieldset>
<div class="row">
<div>{model}</div>
<div><label for="temperature">Temperature</label><input id="temperature" name="temperature" type="number" min="{t_min}" max="{t_max}" step="0.1" value="{temperature}"></div>
<div><label for="max_tokens">Max Tokens</label><input id="max_tokens" name="max_tokens" type="number" min="{m_min}" max="{m_max}" step="1" value="{max_tokens}"></div>
</div>
<button type="submit">Optimize Prompt</button>
{outcome}
<hr>
<p>Powered by Groq LLM services.</p>
</main>
</form>
</body>
</html>
"#,
        user_prompt = text_area("user_prompt", "Enter your prompt:", &form.user_prompt, ""),
        persona = text_input("persona", "Persona/Role", &form.persona, "e.g., expert technical writer"),
        audience = text_input("audience", "Target Audience", &form.audience, "e.g., software developers"),
        task = text_area("task", "Task/Intent", &form.task, "Describe the specific task..."),
        steps = text_area("steps", "Steps", &form.steps, "Enter steps, one per line..."),
        context = text_area("context", "Context", &form.context, "Provide relevant background..."),
        references = text_area("references", "References", &form.references, "Enter references, one per line..."),
        output_format = select("output_format", "Output Format", &output_formats, selected_format),
        tonality = text_input("tonality", "Tone", &form.tonality, "e.g., professional, technical"),
        canvas_prompt = text_area("canvas_prompt", "Your Prompt:", &form.canvas_prompt, ""),
        model = select("model", "Select Model", &model_options(settings, form), selected_model),
        t_min = TEMPERATURE_RANGE.0,
        t_max = TEMPERATURE_RANGE.1,
        m_min = MAX_TOKENS_RANGE.0,
        m_max = MAX_TOKENS_RANGE.1,
        temperature = escape(&temperature),
        max_tokens = escape(&max_tokens),
        outcome = outcome_section(outcome),
    )
}
