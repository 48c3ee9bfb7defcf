//! Server-side rendering of the single page.

use super::types::PageView;

pub const APP_TITLE: &str = "Gemini Health App";
pub const PROMPT_LABEL: &str = "Input Prompt:";
pub const FILE_LABEL: &str = "Choose an image...";
pub const PREVIEW_CAPTION: &str = "Uploaded Image.";
pub const SUBMIT_LABEL: &str = "Tell me the total calories";
pub const RESPONSE_HEADING: &str = "The Response is:";

const STYLE: &str = r#"
    body {
        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
        max-width: 760px;
        margin: 0 auto;
        padding: 32px 20px;
        color: #262730;
    }
    h1 { margin-bottom: 24px; }
    label { display: block; margin: 16px 0 6px; font-size: 0.9em; }
    input[type=text] { width: 100%; padding: 8px; box-sizing: border-box; }
    button { margin-top: 20px; padding: 8px 16px; cursor: pointer; }
    button:disabled { cursor: not-allowed; }
    figure { margin: 20px 0 0; }
    figure img { max-width: 100%; }
    figcaption { color: #808495; font-size: 0.85em; text-align: center; }
    .alert { padding: 12px 16px; border-radius: 6px; margin: 16px 0; }
    .alert-error { background: #ffe4e4; color: #7d1a1a; }
    .response { white-space: pre-wrap; line-height: 1.5; }
"#;

// Shows the picked file before the form is submitted.
const PREVIEW_SCRIPT: &str = r#"
    document.getElementById('image').addEventListener('change', function (event) {
        var file = event.target.files[0];
        var figure = document.getElementById('preview');
        if (!file) { return; }
        var reader = new FileReader();
        reader.onload = function (e) {
            figure.querySelector('img').src = e.target.result;
            figure.hidden = false;
        };
        reader.readAsDataURL(file);
    });
"#;

pub fn render(view: &PageView) -> String {
    let disabled = if view.is_disabled() { " disabled" } else { "" };

    let mut body = String::new();
    body.push_str(&format!("<h1>{}</h1>\n", APP_TITLE));

    if let Some(config_error) = &view.config_error {
        body.push_str(&alert(config_error));
    }

    body.push_str(&format!(
        r#"<form method="post" action="/" enctype="multipart/form-data">
    <label for="prompt">{prompt_label}</label>
    <input type="text" id="prompt" name="prompt" value="{prompt}"{disabled}>
    <label for="image">{file_label}</label>
    <input type="file" id="image" name="image" accept=".jpg,.jpeg,.png,image/jpeg,image/png"{disabled}>
    {preview}
    <button type="submit"{disabled}>{submit_label}</button>
</form>
"#,
        prompt_label = PROMPT_LABEL,
        prompt = escape_html(&view.prompt),
        file_label = FILE_LABEL,
        preview = preview(view),
        submit_label = SUBMIT_LABEL,
        disabled = disabled,
    ));

    if let Some(error) = &view.error {
        body.push_str(&alert(error));
    }

    if let Some(response) = &view.response {
        body.push_str(&format!(
            "<h2>{}</h2>\n<div class=\"response\">{}</div>\n",
            RESPONSE_HEADING,
            escape_html(response)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
{body}<script>{script}</script>
</body>
</html>
"#,
        title = APP_TITLE,
        style = STYLE,
        body = body,
        script = PREVIEW_SCRIPT,
    )
}

fn preview(view: &PageView) -> String {
    let (src, hidden) = match &view.preview {
        Some(payload) => (payload.data_uri(), ""),
        None => (String::new(), " hidden"),
    };
    format!(
        r#"<figure id="preview"{hidden}><img src="{src}" alt="{caption}"><figcaption>{caption}</figcaption></figure>"#,
        hidden = hidden,
        src = src,
        caption = PREVIEW_CAPTION,
    )
}

fn alert(message: &str) -> String {
    format!(
        "<div class=\"alert alert-error\" role=\"alert\">{}</div>\n",
        escape_html(message)
    )
}

pub fn escape_html(text: &str) -> String {
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
