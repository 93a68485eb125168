//! HTML for the command button page served at `GET /`.
//!
//! The page is a single self-contained document: inline styles, one
//! button per configured command, and a small script that POSTs the
//! button's name to `/execute` and shows the returned message.

use std::fmt::Write;

use bubble_core::command::CommandDefinition;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Bubble - Poppit Frontend</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
            display: flex;
            justify-content: center;
            align-items: center;
            padding: 20px;
        }
        .container {
            background: white;
            border-radius: 12px;
            box-shadow: 0 20px 60px rgba(0, 0, 0, 0.3);
            padding: 40px;
            max-width: 800px;
            width: 100%;
        }
        h1 { color: #333; margin-bottom: 10px; font-size: 2.5em; }
        .subtitle { color: #666; margin-bottom: 30px; font-size: 1.1em; }
        .buttons-grid {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(200px, 1fr));
            gap: 15px;
            margin-top: 20px;
        }
        .command-button {
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            border: none;
            padding: 20px;
            border-radius: 8px;
            cursor: pointer;
            font-size: 16px;
            font-weight: 600;
            transition: all 0.3s ease;
            box-shadow: 0 4px 15px rgba(102, 126, 234, 0.4);
        }
        .command-button:hover { transform: translateY(-2px); box-shadow: 0 6px 20px rgba(102, 126, 234, 0.6); }
        .command-button:active { transform: translateY(0); }
        .message { margin-top: 20px; padding: 15px; border-radius: 8px; display: none; }
        .message.success { background-color: #d4edda; color: #155724; border: 1px solid #c3e6cb; }
        .message.error { background-color: #f8d7da; color: #721c24; border: 1px solid #f5c6cb; }
        .message.show { display: block; }
    </style>
</head>
<body>
    <div class="container">
        <h1>&#x1FAE7; Bubble</h1>
        <p class="subtitle">Web Frontend for Poppit</p>

        <div class="buttons-grid">
"#;

const PAGE_TAIL: &str = r#"        </div>

        <div id="message" class="message"></div>
    </div>

    <script>
        const messageDiv = document.getElementById('message');

        function showMessage(text, ok) {
            messageDiv.textContent = text;
            messageDiv.className = 'message ' + (ok ? 'success' : 'error') + ' show';
            setTimeout(() => { messageDiv.className = 'message'; }, 5000);
        }

        function executeCommand(name) {
            fetch('/execute', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ name: name })
            })
            .then(response => response.json())
            .then(data => showMessage(data.message, data.success))
            .catch(error => showMessage('Error: ' + error.message, false));
        }

        document.querySelectorAll('.command-button').forEach(button => {
            button.addEventListener('click', () => executeCommand(button.dataset.name));
        });
    </script>
</body>
</html>
"#;

/// Render the index page with one button per command, in config order.
pub fn render_index(commands: &[CommandDefinition]) -> Result<String, std::fmt::Error> {
    let mut html = String::with_capacity(PAGE_HEAD.len() + PAGE_TAIL.len() + commands.len() * 96);
    html.push_str(PAGE_HEAD);

    for command in commands {
        let name = escape_html(&command.name);
        writeln!(
            html,
            r#"            <button class="command-button" type="button" data-name="{name}">{name}</button>"#
        )?;
    }

    html.push_str(PAGE_TAIL);
    Ok(html)
}

/// Escape text for use in both HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> CommandDefinition {
        CommandDefinition {
            name: name.to_string(),
            repo: "org/app".to_string(),
            branch: "main".to_string(),
            command_type: "deploy".to_string(),
            dir: "/srv".to_string(),
            commands: vec!["make".to_string()],
        }
    }

    #[test]
    fn renders_one_button_per_command_in_order() {
        let html = render_index(&[named("Deploy"), named("Rollback")]).unwrap();

        assert_eq!(html.matches(r#"class="command-button""#).count(), 2);
        let deploy = html.find(r#"data-name="Deploy""#).unwrap();
        let rollback = html.find(r#"data-name="Rollback""#).unwrap();
        assert!(deploy < rollback);
    }

    #[test]
    fn renders_empty_grid_without_commands() {
        let html = render_index(&[]).unwrap();
        assert!(html.contains(r#"<div class="buttons-grid">"#));
        assert!(!html.contains(r#"class="command-button""#));
    }

    #[test]
    fn escapes_names() {
        let html = render_index(&[named(r#"<script>"x"&'y'"#)]).unwrap();

        assert!(!html.contains("<script>\"x\""));
        assert!(html.contains("&lt;script&gt;&quot;x&quot;&amp;&#39;y&#39;"));
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(escape_html("Deploy prod"), "Deploy prod");
    }
}
