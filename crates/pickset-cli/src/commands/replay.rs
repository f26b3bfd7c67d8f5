use anyhow::{Context, Result};
use pickset_application::{ChatContext, EditSessionEngine, Interaction, InterestEditor};
use pickset_core::config::PicksetConfig;
use pickset_core::selection::{SelectionRepository, UserId};
use pickset_core::session::SessionStore;
use pickset_infrastructure::{
    DirSelectionRepository, DirSessionStore, InMemorySelectionRepository, InMemorySessionStore,
    PicksetPaths, TomlCatalogRepository,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::ResolvedPaths;

pub async fn run(
    config: &PicksetConfig,
    paths: &ResolvedPaths,
    user_id: UserId,
    chat_id: i64,
    memory: bool,
    tokens: Vec<String>,
) -> Result<()> {
    let catalog = TomlCatalogRepository::load(&paths.catalog_file)
        .await
        .with_context(|| format!("Failed to load catalog {}", paths.catalog_file.display()))?;

    let (store, selections): (Arc<dyn SessionStore>, Arc<dyn SelectionRepository>) = if memory {
        (
            Arc::new(InMemorySessionStore::new()),
            Arc::new(InMemorySelectionRepository::new()),
        )
    } else {
        (
            Arc::new(DirSessionStore::new(PicksetPaths::sessions_dir(&paths.data_dir))),
            Arc::new(DirSelectionRepository::new(PicksetPaths::selections_dir(
                &paths.data_dir,
            ))),
        )
    };

    let engine = Arc::new(EditSessionEngine::new(
        store,
        Arc::new(catalog),
        selections,
        config.primary.clone(),
        config.session.clone(),
    ));
    let editor = InterestEditor::new(engine);

    let tokens = if tokens.is_empty() {
        read_tokens().await?
    } else {
        tokens
    };

    let chat = ChatContext {
        chat_id,
        message_id: None,
    };
    for token in tokens {
        let interaction = Interaction::new(token, user_id).with_chat(chat.clone());
        if let Some(screen) = editor.handle(&interaction).await? {
            println!("{}", serde_json::to_string(&screen)?);
        }
    }

    Ok(())
}

/// One token per line; blank lines and `#` comments are skipped.
async fn read_tokens() -> Result<Vec<String>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tokens = Vec::new();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        tokens.push(line.to_string());
    }
    Ok(tokens)
}
