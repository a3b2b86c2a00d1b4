use anyhow::Result;
use std::path::PathBuf;

pub async fn run(path: PathBuf, name: Option<String>) -> Result<()> {
    let site_name = name.unwrap_or_else(|| "My Blog".to_string());

    std::fs::create_dir_all(&path)?;
    std::fs::create_dir_all(path.join("data"))?;

    let config = format!(
        r#"[site]
title = "{}"
description = "A minimal blog"
url = "http://localhost:3000"
language = "en"

[server]
host = "127.0.0.1"
port = 3000

[database]
path = "./data/minipress.db"
pool_size = 10
"#,
        site_name
    );

    std::fs::write(path.join("minipress.toml"), config)?;

    tracing::info!("Created new minipress site at {:?}", path);
    tracing::info!("Run 'minipress migrate' to set up the database");
    tracing::info!("Run 'minipress serve' to start the server");

    Ok(())
}
