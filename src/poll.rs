use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tokio::sync::mpsc;

/// One reading from the grip server: the live value and the running
/// maximum it keeps for the session.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GripSample {
    pub grip: f64,
    pub max: f64,
}

#[derive(Debug)]
pub enum Cmd {
    Sample(GripSample),
    PollFailed(String),
}

pub fn parse_sample(body: &str) -> Result<GripSample> {
    serde_json::from_str(body).context("grip sample JSON parse failed")
}

async fn fetch_sample(client: &reqwest::Client, url: &str) -> Result<GripSample> {
    let resp = client
        .get(url)
        .send()
        .await
        .context("grip request failed")?;
    if !resp.status().is_success() {
        return Err(anyhow!("grip endpoint HTTP {}", resp.status()));
    }
    let body = resp.text().await.context("grip response read failed")?;
    parse_sample(&body)
}

/// Polls the grip endpoint forever at a fixed cadence, reporting each
/// outcome as a command. Failures never kill the task; the fire just keeps
/// burning at whatever the last reading was. Dropping the receiver stops
/// the loop.
pub fn spawn_poller(
    tx: mpsc::Sender<Cmd>,
    url: String,
    every: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let client = reqwest::Client::new();
        let mut t = tokio::time::interval(every);
        loop {
            t.tick().await;
            let cmd = match fetch_sample(&client, &url).await {
                Ok(s) => Cmd::Sample(s),
                Err(e) => Cmd::PollFailed(format!("{e:#}")),
            };
            if tx.send(cmd).await.is_err() {
                break;
            }
        }
    })
}
