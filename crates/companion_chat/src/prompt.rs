//! Prompt assembly.
//!
//! The model sees the full project on every call: a one-line-per-entry
//! structure summary, the concatenated contents of every file, and the
//! user's request, wrapped in instructions that pin the reply JSON shape.

use companion_vfs::{ConsoleMessage, Entry};

/// One line per entry: `D path` for folders, `F path` for files.
pub fn structure_summary(entries: &[Entry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{} {}",
                if entry.is_folder() { "D" } else { "F" },
                entry.path
            )
        })
        .collect::<Vec<String>>()
        .join("\n")
}

/// Every file's content, each introduced by a `--- File: path ---` header.
pub fn concatenated_contents(entries: &[Entry]) -> String {
    entries
        .iter()
        .filter(|entry| entry.is_file())
        .map(|entry| format!("\n\n--- File: {} ---\n{}", entry.path, entry.content))
        .collect()
}

/// Build the full prompt for one request.
pub fn build_prompt(
    user_prompt: &str,
    entries: &[Entry],
    console_context: Option<&str>,
) -> String {
    let structure = structure_summary(entries);
    let contents = concatenated_contents(entries);

    let structure_block = if structure.is_empty() {
        "\nThe project is currently empty. You can create files and folders following the \
         guidelines above if a new project is implied."
            .to_string()
    } else {
        format!(
            "\nCurrent project file structure (list of paths and types):\n{}",
            structure
        )
    };

    let console_block = match console_context {
        Some(context) => format!(
            "\n\n--- User's Console Logs at Time of Request ---\n{}\n--- End Console Logs ---",
            context
        ),
        None => String::new(),
    };

    format!(
        r#"You are an AI coding assistant. Your goal is to help the user with their coding tasks by providing explanations and generating file operations.
Please respond with a JSON object of this shape:
{{
  "explanation": string,
  "fileOperations": [
    {{ "action": "create_file" | "update_file" | "delete_file" | "create_folder" | "delete_folder", "path": string, "content": string (optional) }}
  ]
}}
The 'explanation' field should be your textual response to the user.
The 'fileOperations' field should be an array of file operations needed to fulfill the user's request.
Ensure paths are full paths from the project root. For 'create_folder', the 'content' field is not needed.
If no file operations are needed, omit the 'fileOperations' field or provide an empty array.

GENERAL PROJECT STRUCTURE GUIDELINES:
When the user asks to create a new project, or if the project is currently empty and the user's request implies starting a new project, please use the following basic project structure as a default, unless the user specifies a different structure:
- A `README.md` file in the project root containing a brief project description.
- A `src/` directory for primary source code.
- An entry point file within the `src/` directory. Common names are `main.js`, `app.js`, `index.js`. If the project type is clear from the user's request (e.g., Python, Java), use an appropriate extension (e.g., `src/main.py`, `src/Main.java`). If not specified, default to `src/main.js` with basic placeholder content.
- A `.gitignore` file in the project root, with common ignores for the project type if discernible, or a general set of ignores otherwise (e.g., .env, build/, dist/).
- Optionally, if it appears to be a web project, consider a `public/` directory for static assets (e.g., `public/index.html`, `public/style.css`).
- Optionally, a `tests/` directory for test files.
Remember to prioritize the user's explicit instructions for file structure if they provide any. This default structure is a guideline for when the user is less specific about the initial setup.
{structure_block}{contents}{console_block}

Based on all the above context (including any provided screenshot), the user's current project state, and their specific request below, provide your explanation and any necessary file operations.

User's request: {user_prompt}"#
    )
}

/// Build the prompt for a "fix with AI" attempt on one console error.
pub fn build_fix_prompt(log: &ConsoleMessage, selected: Option<&Entry>) -> String {
    let mut prompt = format!(
        "The following error occurred in the application:\nTimestamp: {}\nType: {:?}\nMessage: {}\n\n",
        log.timestamp.to_rfc3339(),
        log.level,
        log.message
    );
    if let Some(entry) = selected {
        prompt.push_str(&format!(
            "The currently open file is \"{}\" and its content is:\n```\n{}\n```\n\n",
            entry.path, entry.content
        ));
    }
    prompt.push_str(
        "Please analyze this error and the project context. Provide an explanation of the \
         likely cause and suggest file operations to fix it. If the error is related to CSS \
         or UI, consider the visual aspects.",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_vfs::{Console, LogLevel};

    #[test]
    fn test_structure_summary_marks_kinds() {
        let entries = vec![Entry::folder("src"), Entry::file("src/app.js", "x")];
        assert_eq!(structure_summary(&entries), "D src\nF src/app.js");
    }

    #[test]
    fn test_concatenated_contents_skips_folders() {
        let entries = vec![Entry::folder("src"), Entry::file("src/app.js", "let x;")];
        let contents = concatenated_contents(&entries);
        assert!(contents.contains("--- File: src/app.js ---"));
        assert!(contents.contains("let x;"));
        assert!(!contents.contains("--- File: src ---"));
    }

    #[test]
    fn test_empty_project_gets_empty_note() {
        let prompt = build_prompt("make an app", &[], None);
        assert!(prompt.contains("The project is currently empty"));
        assert!(prompt.ends_with("User's request: make an app"));
    }

    #[test]
    fn test_console_context_is_included_when_present() {
        let prompt = build_prompt("help", &[], Some("error: x is undefined"));
        assert!(prompt.contains("x is undefined"));
        assert!(prompt.contains("End Console Logs"));
    }

    #[test]
    fn test_fix_prompt_includes_selected_file() {
        let mut console = Console::default();
        console.push(LogLevel::Error, "boom");
        let log = console.messages().last().unwrap().clone();
        let file = Entry::file("app.css", "body { color: red }");
        let prompt = build_fix_prompt(&log, Some(&file));
        assert!(prompt.contains("boom"));
        assert!(prompt.contains("app.css"));
        assert!(prompt.contains("color: red"));
    }
}
