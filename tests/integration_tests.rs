use anyhow::Result;
use creche_watch::{
    DaycareResultFetcher, ErrorKind, FilePositionStore, PositionWatcher, TelegramNotifier,
    WatchConfig,
};
use httpmock::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use tempfile::TempDir;

const BOT_PATH: &str = "/botTEST:TOKEN/sendMessage";

fn results_page(position: u64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head><meta charset="utf-8"><title>Demanda de Alunos - Resultado</title></head>
<body>
<div class="card"><h3>Resultado da classificação</h3>
<p class="posicao">Sua posição na fila de espera é: <span class="badge">#{}</span></p>
</div>
</body>
</html>
"#,
        position
    )
}

fn config(server: &MockServer, state_file: &Path) -> Result<WatchConfig> {
    let vars = HashMap::from([
        ("CRECHE_NE", "445566".to_string()),
        ("CRECHE_DA", "10/10/2022".to_string()),
        ("TELEGRAM_BOT_TOKEN", "TEST:TOKEN".to_string()),
        ("TELEGRAM_CHAT_ID", "987".to_string()),
        ("CRECHE_BASE_URL", server.url("/")),
        ("TELEGRAM_API_BASE", server.base_url()),
        ("CRECHE_STATE_FILE", state_file.to_string_lossy().into_owned()),
        ("CRECHE_TIMEOUT_SECONDS", "5".to_string()),
    ]);
    Ok(WatchConfig::from_lookup(|key| vars.get(key).cloned())?)
}

fn watcher(
    config: &WatchConfig,
) -> Result<PositionWatcher<DaycareResultFetcher, FilePositionStore, TelegramNotifier>> {
    Ok(PositionWatcher::new(
        DaycareResultFetcher::new(config)?,
        FilePositionStore::new(config.state_file()),
        TelegramNotifier::new(config)?,
    ))
}

fn mock_session(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .header("Set-Cookie", "ci_session=s1; Path=/")
            .body("<html><form action=\"resultado_classificacao\"></form></html>");
    });
}

#[tokio::test]
async fn test_first_run_stores_position_and_notifies() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let state_file = temp_dir.path().join("last_position.txt");
    let server = MockServer::start();

    mock_session(&server);
    let results_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/resultado_classificacao")
            .x_www_form_urlencoded_tuple("ne", "445566")
            .x_www_form_urlencoded_tuple("da", "10/10/2022")
            .x_www_form_urlencoded_tuple("entrar", "Verificar");
        then.status(200).body(results_page(3));
    });
    let telegram_mock = server.mock(|when, then| {
        when.method(POST)
            .path(BOT_PATH)
            .x_www_form_urlencoded_tuple("chat_id", "987")
            .x_www_form_urlencoded_tuple("text", "First reading: position 3");
        then.status(200).body(r#"{"ok":true}"#);
    });

    let config = config(&server, &state_file)?;
    let report = watcher(&config)?.run().await?;

    results_mock.assert();
    telegram_mock.assert();
    assert_eq!(report.previous, None);
    assert_eq!(report.current.value(), 3);
    assert_eq!(report.message, "First reading: position 3");
    assert_eq!(std::fs::read_to_string(&state_file)?, "3");
    Ok(())
}

#[tokio::test]
async fn test_second_run_reports_improvement() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let state_file = temp_dir.path().join("last_position.txt");
    std::fs::write(&state_file, "12")?;
    let server = MockServer::start();

    mock_session(&server);
    server.mock(|when, then| {
        when.method(POST).path("/resultado_classificacao");
        then.status(200).body(results_page(9));
    });
    let telegram_mock = server.mock(|when, then| {
        when.method(POST)
            .path(BOT_PATH)
            .x_www_form_urlencoded_tuple("text", "Decreased from 12 to 9");
        then.status(200);
    });

    let config = config(&server, &state_file)?;
    let report = watcher(&config)?.run().await?;

    telegram_mock.assert();
    assert_eq!(report.previous.map(|p| p.value()), Some(12));
    assert_eq!(std::fs::read_to_string(&state_file)?, "9");
    Ok(())
}

#[tokio::test]
async fn test_layout_change_alerts_and_keeps_previous_state() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let state_file = temp_dir.path().join("last_position.txt");
    std::fs::write(&state_file, "12")?;
    let server = MockServer::start();

    mock_session(&server);
    server.mock(|when, then| {
        when.method(POST).path("/resultado_classificacao");
        then.status(200)
            .body(format!("<html><body>{}</body></html>", "Manutenção programada. ".repeat(10)));
    });
    let alert_mock = server.mock(|when, then| {
        when.method(POST)
            .path(BOT_PATH)
            .body_contains("Error+extracting+queue+position");
        then.status(200);
    });

    let config = config(&server, &state_file)?;
    let err = watcher(&config)?.run().await.unwrap_err();

    alert_mock.assert();
    assert_eq!(err.kind(), ErrorKind::Extraction);
    assert_eq!(err.exit_code(), 1);
    assert_eq!(std::fs::read_to_string(&state_file)?, "12");
    Ok(())
}

#[tokio::test]
async fn test_site_down_and_telegram_down_returns_fetch_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let state_file = temp_dir.path().join("last_position.txt");
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(502);
    });
    let alert_mock = server.mock(|when, then| {
        when.method(POST).path(BOT_PATH);
        then.status(500);
    });

    let config = config(&server, &state_file)?;
    let err = watcher(&config)?.run().await.unwrap_err();

    alert_mock.assert();
    assert_eq!(err.kind(), ErrorKind::Fetch);
    assert!(err.to_string().contains("Initial GET failed"));
    assert!(!state_file.exists());
    Ok(())
}
