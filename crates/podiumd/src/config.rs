use std::{collections::BTreeMap, fs, net::SocketAddr, path::PathBuf, str::FromStr};

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use podium_api::PageOptions;
use podium_core::ranking::{DEFAULT_METRIC, MetricTable};
use podium_observe::LoggerTimeZone;

/// Server settings.
///
/// Loaded from an optional JSON file named by `PODIUM_CONFIG`, then
/// overridden field by field from `PODIUM_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: SocketAddr,
    /// Ranking metric for tasks without an override.
    pub metric: String,
    /// Per-task ranking metric overrides.
    pub task_metrics: BTreeMap<String, String>,
    /// Page title and heading.
    pub title: String,
    /// Client refresh interval of `GET /`, in seconds.
    pub refresh_secs: u32,
    /// Directory served under `/static`.
    pub static_dir: Option<PathBuf>,
    /// Logo URL shown on the page.
    pub logo_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            metric: DEFAULT_METRIC.to_string(),
            task_metrics: BTreeMap::new(),
            title: "Live Leaderboard".to_string(),
            refresh_secs: 15,
            static_dir: None,
            logo_url: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup("PODIUM_CONFIG") {
            Some(path) => {
                let raw = fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {path}"))?;
                serde_json::from_str(&raw).with_context(|| format!("parsing config file {path}"))?
            }
            None => Self::default(),
        };

        if let Some(v) = lookup("PODIUM_ADDR") {
            cfg.addr = parse("PODIUM_ADDR", &v)?;
        }
        if let Some(v) = lookup("PODIUM_METRIC") {
            cfg.metric = v;
        }
        if let Some(v) = lookup("PODIUM_TASK_METRICS") {
            cfg.task_metrics = parse_task_metrics(&v)?;
        }
        if let Some(v) = lookup("PODIUM_TITLE") {
            cfg.title = v;
        }
        if let Some(v) = lookup("PODIUM_REFRESH_SECS") {
            cfg.refresh_secs = parse("PODIUM_REFRESH_SECS", &v)?;
        }
        if let Some(v) = lookup("PODIUM_STATIC_DIR") {
            cfg.static_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("PODIUM_LOGO") {
            cfg.logo_url = Some(v);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.metric.trim().is_empty() {
            bail!("ranking metric must not be empty");
        }
        if self.refresh_secs == 0 {
            bail!("refresh interval must be at least one second");
        }
        Ok(())
    }

    pub fn metric_table(&self) -> MetricTable {
        self.task_metrics
            .iter()
            .fold(MetricTable::new(&self.metric), |table, (task, metric)| {
                table.with_task(task.as_str(), metric.as_str())
            })
    }

    pub fn page_options(&self, tz: LoggerTimeZone) -> PageOptions {
        PageOptions {
            title: self.title.clone(),
            refresh_secs: self.refresh_secs,
            logo_url: self.logo_url.clone(),
            offset: tz.offset(),
        }
    }
}

fn parse<T>(key: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("invalid {key} value: {value}"))
}

/// Parse `task=metric;task=metric`.
fn parse_task_metrics(raw: &str) -> anyhow::Result<BTreeMap<String, String>> {
    let mut out = BTreeMap::new();
    for pair in raw.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((task, metric)) = pair.split_once('=') else {
            bail!("invalid PODIUM_TASK_METRICS entry '{pair}' (expected task=metric)");
        };
        let (task, metric) = (task.trim(), metric.trim());
        if task.is_empty() || metric.is_empty() {
            bail!("invalid PODIUM_TASK_METRICS entry '{pair}' (expected task=metric)");
        }
        out.insert(task.to_string(), metric.to_string());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use podium_model::TaskKey;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(cfg, ServerConfig::default());
        assert_eq!(cfg.addr.port(), 8000);
        assert_eq!(cfg.metric, "Instance F1 Score");
        assert_eq!(cfg.refresh_secs, 15);
    }

    #[test]
    fn environment_overrides_defaults() {
        let cfg = ServerConfig::from_lookup(lookup(&[
            ("PODIUM_ADDR", "127.0.0.1:9100"),
            ("PODIUM_METRIC", "F1"),
            ("PODIUM_TASK_METRICS", "det=Mean AP; seg = Instance F1 Score ;"),
            ("PODIUM_TITLE", "Segmentation"),
            ("PODIUM_REFRESH_SECS", "30"),
            ("PODIUM_STATIC_DIR", "/srv/static"),
            ("PODIUM_LOGO", "/static/logo.png"),
        ]))
        .unwrap();

        assert_eq!(cfg.addr, "127.0.0.1:9100".parse().unwrap());
        assert_eq!(cfg.refresh_secs, 30);
        assert_eq!(cfg.static_dir, Some(PathBuf::from("/srv/static")));
        assert_eq!(cfg.logo_url.as_deref(), Some("/static/logo.png"));

        let table = cfg.metric_table();
        assert_eq!(table.default_metric(), "F1");
        assert_eq!(table.metric_for(&TaskKey::from("det")), "Mean AP");
        assert_eq!(table.metric_for(&TaskKey::from("seg")), "Instance F1 Score");
        assert_eq!(table.metric_for(&TaskKey::from("cls")), "F1");
    }

    #[test]
    fn malformed_values_are_rejected() {
        for vars in [
            [("PODIUM_ADDR", "not-an-addr")],
            [("PODIUM_REFRESH_SECS", "soon")],
            [("PODIUM_REFRESH_SECS", "0")],
            [("PODIUM_TASK_METRICS", "det")],
            [("PODIUM_TASK_METRICS", "=Mean AP")],
            [("PODIUM_METRIC", "  ")],
        ] {
            assert!(
                ServerConfig::from_lookup(lookup(&vars)).is_err(),
                "expected error for {vars:?}"
            );
        }
    }

    #[test]
    fn json_file_is_read_then_overridden() {
        let path = std::env::temp_dir().join(format!("podiumd-config-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{"metric": "Mean AP", "title": "From file", "task_metrics": {"seg": "F1"}}"#,
        )
        .unwrap();

        let path_str = path.to_string_lossy().to_string();
        let cfg = ServerConfig::from_lookup(lookup(&[
            ("PODIUM_CONFIG", path_str.as_str()),
            ("PODIUM_TITLE", "From env"),
        ]))
        .unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(cfg.metric, "Mean AP");
        assert_eq!(cfg.title, "From env");
        assert_eq!(cfg.task_metrics.get("seg").map(String::as_str), Some("F1"));
        assert_eq!(cfg.refresh_secs, 15);
    }

    #[test]
    fn page_options_follow_config() {
        let cfg = ServerConfig {
            title: "Board".into(),
            refresh_secs: 5,
            ..Default::default()
        };
        let page = cfg.page_options(LoggerTimeZone::Utc);

        assert_eq!(page.title, "Board");
        assert_eq!(page.refresh_secs, 5);
        assert!(page.offset.is_utc());
    }
}
