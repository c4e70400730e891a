use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tokio::sync::Mutex;

use helium::dialogs::{ConfirmPrompt, Dialogs};
use helium::model::Collection;
use helium::upload::EditDraft;

/// Dialogs answered on stdin. With `assume_yes` every confirmation is
/// accepted and the prefilled edit is submitted as is.
pub(super) struct TerminalDialogs {
    assume_yes: bool,
    stdin: Mutex<BufReader<Stdin>>,
}

impl TerminalDialogs {
    pub(super) fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            stdin: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }

    /// `None` on end of input.
    async fn ask(&self, question: &str) -> Option<String> {
        let mut stderr = tokio::io::stderr();
        stderr.write_all(question.as_bytes()).await.ok()?;
        stderr.flush().await.ok()?;

        let mut line = String::new();
        let n = self.stdin.lock().await.read_line(&mut line).await.ok()?;
        if n == 0 {
            return None;
        }
        Some(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

fn print_prompt(prompt: &ConfirmPrompt) {
    eprintln!("{}", prompt.title);
    eprintln!("{}", prompt.message);
    if let Some(warning) = &prompt.warning {
        eprintln!("warning: {}", warning);
    }
}

impl Dialogs for TerminalDialogs {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        print_prompt(prompt);
        if self.assume_yes {
            return true;
        }
        matches!(
            self.ask("[y/N] ").await.as_deref().map(str::trim),
            Some("y") | Some("Y") | Some("yes")
        )
    }

    async fn type_to_confirm(&self, prompt: &ConfirmPrompt, token: &str) -> Option<String> {
        print_prompt(prompt);
        if self.assume_yes {
            return Some(token.to_string());
        }
        self.ask("> ").await
    }

    async fn edit_collection(&self, draft: &EditDraft) -> Option<Collection> {
        let mut collection = draft.collection.clone();
        eprintln!("Collection {}", collection.guid);
        eprintln!("  description: {}", collection.description);
        eprintln!("  tags: {}", collection.tags.join(","));
        if !draft.available_tags.is_empty() {
            eprintln!("  known tags: {}", draft.available_tags.join(","));
        }
        if self.assume_yes {
            return Some(collection);
        }

        let answer = self.ask("Edit collection before saving? [y/N] ").await?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            return None;
        }
        let description = self
            .ask(&format!("Description [{}]: ", collection.description))
            .await?;
        if !description.trim().is_empty() {
            collection.description = description.trim().to_string();
        }
        let tags = self
            .ask(&format!("Tags [{}]: ", collection.tags.join(",")))
            .await?;
        if !tags.trim().is_empty() {
            collection.tags = tags
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
        }
        Some(collection)
    }
}
