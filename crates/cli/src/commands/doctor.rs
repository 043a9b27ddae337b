use mememart_core::config::{AppConfig, LoadOptions};
use mememart_core::CartStore;
use mememart_imgflip::ImgflipClient;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_cart_store(&config));
            checks.push(check_upstream_api(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "cart_store_access",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
            checks.push(DoctorCheck {
                name: "upstream_api",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_cart_store(config: &AppConfig) -> DoctorCheck {
    let store = CartStore::new(&config.cart.path);
    match store.load() {
        Ok(cart) => DoctorCheck {
            name: "cart_store_access",
            status: CheckStatus::Pass,
            details: format!(
                "cart at `{}` readable ({} items)",
                store.path().display(),
                cart.total_items()
            ),
        },
        Err(error) => DoctorCheck {
            name: "cart_store_access",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn check_upstream_api(config: &AppConfig) -> DoctorCheck {
    let client = match ImgflipClient::new(&config.catalog) {
        Ok(client) => client,
        Err(error) => {
            return DoctorCheck {
                name: "upstream_api",
                status: CheckStatus::Fail,
                details: format!("failed to build HTTP client: {error}"),
            }
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return DoctorCheck {
                name: "upstream_api",
                status: CheckStatus::Fail,
                details: format!("failed to initialize async runtime: {error}"),
            };
        }
    };

    match runtime.block_on(client.fetch()) {
        Ok(catalog) => DoctorCheck {
            name: "upstream_api",
            status: CheckStatus::Pass,
            details: format!("fetched {} memes from `{}`", catalog.len(), client.api_url()),
        },
        Err(error) => DoctorCheck {
            name: "upstream_api",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
