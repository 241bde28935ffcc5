//! Form page generation.

use std::fmt::Write as _;

use tracing::{event, Level};

use crate::{
    fields::{format_color, parse_options, OptionsTruncated},
    query::PARAM_SEPARATOR,
    registry::{FieldRegistry, FIELD_TAG_BASE},
    server::FormHandler,
};

/// One in-progress page render.
///
/// Handed to [`FormHandler::build_form`] to declare the form's fields, in
/// order. Every tag-consuming `add_*` call appends the field's markup, bound
/// to its freshly allocated tag as the element id.
pub struct PageBuilder<'a> {
    registry: &'a mut FieldRegistry,
    out: &'a mut String,
}

impl<'a> PageBuilder<'a> {
    /// Add a subheading to organize form sections. Consumes no tag.
    pub fn add_subheading(&mut self, text: &str) {
        let _ = writeln!(self.out, "<h2 class=\"subheading\">{text}</h2>");
    }

    /// Add a text input field.
    pub fn add_text(&mut self, prompt: &str, default: &str) {
        let Some(id) = self.open_field_group(prompt) else {
            return;
        };

        let _ = writeln!(
            self.out,
            "<input type='text' id='{id}' value='{default}'>"
        );
        self.close_field_group();
    }

    /// Add a dropdown with comma-separated options.
    ///
    /// The option at `default_index` starts out selected. With `return_text`
    /// set the submitted value is the option's own text, otherwise its
    /// ordinal position.
    ///
    /// More than [`MAX_FIELD_OPTIONS`](crate::MAX_FIELD_OPTIONS) options
    /// are truncated; the field is still rendered with the capped list, and
    /// the overflow reported back.
    pub fn add_drop_down(
        &mut self,
        prompt: &str,
        options: &str,
        default_index: usize,
        return_text: bool,
    ) -> Result<(), OptionsTruncated> {
        let Some(id) = self.open_field_group(prompt) else {
            return Ok(());
        };

        let (options, truncated) = parse_options(options);

        let _ = writeln!(self.out, "<select id=\"{id}\">");
        for (ordinal, text) in options.iter().enumerate() {
            let selected = if ordinal == default_index { " selected" } else { "" };
            if return_text {
                let _ = writeln!(
                    self.out,
                    "<option value=\"{text}\"{selected}>{text}</option>"
                );
            } else {
                let _ = writeln!(
                    self.out,
                    "<option value=\"{ordinal}\"{selected}>{text}</option>"
                );
            }
        }
        self.out.push_str("</select>\n");
        self.close_field_group();

        match truncated {
            Some(truncated) => Err(truncated),
            None => Ok(()),
        }
    }

    /// Add a dropdown with one option per integer in `min..=max`.
    ///
    /// Each option's value equals its label; the option equal to `default`
    /// starts out selected.
    pub fn add_drop_down_range(&mut self, prompt: &str, min: i32, max: i32, default: i32) {
        let Some(id) = self.open_field_group(prompt) else {
            return;
        };

        let _ = writeln!(self.out, "<select id=\"{id}\">");
        for option in min..=max {
            let selected = if option == default { " selected" } else { "" };
            let _ = writeln!(
                self.out,
                "<option value=\"{option}\"{selected}>{option}</option>"
            );
        }
        self.out.push_str("</select>\n");
        self.close_field_group();
    }

    /// Add a color picker field, with the default given as an integer color
    /// such as `0xFF0000`.
    pub fn add_color_picker(&mut self, prompt: &str, default_color: u32) {
        let Some(id) = self.open_field_group(prompt) else {
            return;
        };

        let default = format_color(default_color);
        let _ = writeln!(
            self.out,
            "<input type='color' id='{id}' value='{default}'>"
        );
        self.close_field_group();
    }

    /// Allocate a tag and open the field's container markup.
    ///
    /// An empty prompt skips the field entirely: no tag, no markup.
    fn open_field_group(&mut self, prompt: &str) -> Option<String> {
        if prompt.is_empty() {
            event!(Level::DEBUG, "skipping field with empty prompt");
            return None;
        }

        let tag = self.registry.allocate();
        let id = format!("x{tag}");

        self.out.push_str("<div class=\"field-group\">\n");
        let _ = writeln!(self.out, "<label class=\"field-label\">{prompt}</label>");

        Some(id)
    }

    fn close_field_group(&mut self) {
        self.out.push_str("</div>\n");
    }
}

/// Generate the full page response for one render.
///
/// Resets the registry, lets the handler declare its fields, and returns the
/// complete response: status line, content type header, blank line, markup.
pub fn render_page<H>(handler: &mut H, registry: &mut FieldRegistry, title: &str) -> String
where
    H: FormHandler,
{
    registry.start_render();

    let mut out = String::new();
    html_start(&mut out, title);

    let mut page = PageBuilder {
        registry: &mut *registry,
        out: &mut out,
    };
    handler.build_form(&mut page);

    html_end(&mut out, registry);
    out
}

fn html_start(out: &mut String, title: &str) {
    out.push_str("HTTP/1.1 200 OK\r\nContent-type:text/html\r\n\r\n");

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"UTF-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str(STYLE);
    let _ = writeln!(out, "<title>{title}</title>");
    out.push_str("</head>\n<body>\n<div id=\"container\">\n");
    let _ = writeln!(out, "<h1 id=\"header\">{title}</h1>");
    out.push_str("<div id=\"inputs\">\n");
}

fn html_end(out: &mut String, registry: &FieldRegistry) {
    out.push_str("<div class=\"button-separator\"></div>\n");
    out.push_str(
        "<button type=\"button\" class=\"save-button\" onclick=\"SendText()\">\
         Save Configuration</button>\n",
    );
    out.push_str("</div></div>\n");

    out.push_str("<script>\nfunction SendText() {\n");
    out.push_str("  var request = new XMLHttpRequest();\n");
    let _ = writeln!(out, "  var sep = '{PARAM_SEPARATOR}';");
    out.push_str("  var netText = '?';\n");

    // Walk the same BASE + N sequence the render used, so the script reads
    // back exactly the ids that were just emitted
    let mut tag = FIELD_TAG_BASE;
    for index in 1..=registry.field_count() {
        tag += 1;
        if index > 1 {
            out.push_str("  netText += sep;\n");
        }
        let _ = writeln!(out, "  var field{index} = document.getElementById('x{tag}');");
        let _ = writeln!(
            out,
            "  if (field{index}) netText += 'x{tag}=' + encodeURIComponent(field{index}.value);"
        );
    }

    // Replace the page with the success box before the request goes out
    out.push_str("  document.body.innerHTML = '';\n");
    out.push_str(
        "  document.body.style.cssText = 'font-family: -apple-system, BlinkMacSystemFont, \
         \\'Segoe UI\\', Roboto, sans-serif; background: #ffffff; margin: 0; padding: 20px; \
         color: #1e293b; line-height: 1.6;';\n",
    );
    out.push_str("  var successBox = document.createElement('div');\n");
    out.push_str("  successBox.className = 'success-message';\n");
    out.push_str("  successBox.textContent = '\u{2713} Configuration Saved!';\n");
    out.push_str("  document.body.appendChild(successBox);\n");

    out.push_str("  var nocache = '&nocache=' + Math.random() * 1000000;\n");
    out.push_str("  request.open('GET', '/ajax_inputs' + netText + nocache, true);\n");
    out.push_str("  request.send(null);\n");
    out.push_str("}\n</script>\n</body>\n</html>\n\n");
}

const STYLE: &str = r#"<style>
:root {
  --primary-color: #2563eb;
  --primary-hover: #1d4ed8;
  --success-color: #059669;
  --background: #f8fafc;
  --card-bg: #ffffff;
  --text-primary: #1e293b;
  --text-secondary: #475569;
  --border: #e2e8f0;
  --border-focus: #3b82f6;
  --shadow: 0 4px 6px -1px rgba(0, 0, 0, 0.1);
  --shadow-lg: 0 10px 15px -3px rgba(0, 0, 0, 0.1);
}
* { box-sizing: border-box; }
body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
  background: linear-gradient(135deg, var(--background) 0%, #e2e8f0 100%);
  margin: 0; padding: 20px; color: var(--text-primary); line-height: 1.6;
}
#container {
  max-width: 800px; margin: 0 auto; background: var(--card-bg);
  border-radius: 16px; box-shadow: var(--shadow-lg); overflow: hidden;
}
#header {
  background: linear-gradient(135deg, var(--primary-color) 0%, var(--primary-hover) 100%);
  color: white; text-align: center; padding: 0px 20px; font-size: 1.1rem;
  font-weight: 700; margin: 0; letter-spacing: -0.5px;
  border-radius: 16px 16px 0 0; line-height: 0.9;
}
#inputs { padding: 40px; margin-top: 5px; }
.subheading {
  font-size: 1.5rem; font-weight: 600; color: var(--text-primary);
  margin: 40px 0 20px 0; padding-bottom: 10px;
  border-bottom: 2px solid var(--border);
}
.subheading:first-child { margin-top: 0; }
.field-group { margin-bottom: 24px; }
.field-label {
  display: block; font-size: 1.1rem; font-weight: 500;
  color: var(--text-primary); margin-bottom: 8px;
}
input[type="text"], input[type="password"], select {
  width: 100%; height: 48px; padding: 12px; font-size: 1.1rem;
  border: 2px solid var(--border); border-radius: 8px;
  background: var(--card-bg); transition: all 0.2s ease; outline: none;
}
input[type="text"]:focus, input[type="password"]:focus, select:focus {
  border-color: var(--border-focus);
  box-shadow: 0 0 0 3px rgba(59, 130, 246, 0.1);
}
input[type="color"] {
  width: 100%; height: 60px; padding: 4px;
  border: 2px solid var(--border); border-radius: 8px;
  cursor: pointer; transition: all 0.2s ease;
}
input[type="color"]:hover {
  border-color: var(--border-focus);
}
.button-separator {
  width: 100%; height: 1px;
  background: var(--border);
  margin: 30px 0 20px 0;
}
.save-button {
  width: 100%; padding: 20px; font-size: 1.2rem; font-weight: 600;
  color: white; background: linear-gradient(135deg, var(--success-color) 0%, #047857 100%);
  border: none; border-radius: 12px; cursor: pointer;
  transition: all 0.2s ease; margin-top: 20px; box-shadow: var(--shadow);
}
.save-button:hover {
  transform: translateY(-2px); box-shadow: var(--shadow-lg);
}
.save-button:active { transform: translateY(0); }
.success-message {
  background: linear-gradient(135deg, #d1fae5 0%, #a7f3d0 100%);
  color: #065f46; padding: 32px; border-radius: 12px; text-align: center;
  font-size: 1.3rem; font-weight: 600; border: 2px solid #34d399;
  animation: slideIn 0.3s ease;
}
@keyframes slideIn {
  from { opacity: 0; transform: translateY(-20px); }
  to { opacity: 1; transform: translateY(0); }
}
@media (max-width: 600px) {
  body { padding: 10px; }
  #header { font-size: 2rem; padding: 30px 20px; }
  #inputs { padding: 20px; }
}
</style>
"#;
