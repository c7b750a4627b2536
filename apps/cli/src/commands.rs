use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use drive_model::{Drive, DriveVector};
use fit_ranker::{
    EngineConfig, FitRanker, FitResult, SortMode, UserProfile, load_answers, load_catalog,
    sort_fit_results,
};
use instrumentation_router::{RouteSet, SatisfactionBand};
use log::info;
use serde_json::{Value, json};

use crate::output::{Output, UsageError, round3};

pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(p) => {
            info!("using engine config {}", p.display());
            EngineConfig::load(p).context("loading engine config")
        }
        None => Ok(EngineConfig::default()),
    }
}

fn load_user(path: &Path) -> Result<UserProfile> {
    let answers = load_answers(path).context("loading answers")?;
    UserProfile::from_answers(&answers).context("building profile")
}

pub fn cmd_profile(config: &EngineConfig, answers: &Path) -> Result<Output> {
    let user = load_user(answers)?;
    let ranker = FitRanker::from_config(config);
    let satisfaction = ranker.router().satisfaction(&user.satisfaction_inputs);
    let routes = ranker.routes(&user);
    let bands: BTreeMap<Drive, SatisfactionBand> = satisfaction
        .iter()
        .map(|(d, v)| (d, SatisfactionBand::classify(v)))
        .collect();

    let mut text = String::new();
    let _ = writeln!(text, "{:<12} {:>7} {:>7} {:>7} {:>7}  band", "drive", "innate", "surface", "imposed", "satisf.");
    for drive in Drive::ALL {
        let _ = writeln!(
            text,
            "{:<12} {:>7.2} {:>7.2} {:>7.2} {:>7.2}  {}",
            drive.name(),
            user.innate[drive],
            user.surface[drive],
            user.imposed[drive],
            satisfaction[drive],
            bands[&drive],
        );
    }
    text.push_str(&render_routes(&routes));

    Ok(Output {
        data: json!({
            "innate": user.innate,
            "surface": user.surface,
            "imposed": user.imposed,
            "satisfaction": satisfaction,
            "bands": bands,
            "routes": routes,
            "total_path_drain": round3(routes.total_path_drain()),
        }),
        text,
    })
}

pub fn cmd_rank(
    config: &EngineConfig,
    answers: &Path,
    catalog: &Path,
    sort: &str,
    limit: Option<usize>,
) -> Result<Output> {
    let mode: SortMode = sort.parse()?;
    let user = load_user(answers)?;
    let subtypes = load_catalog(catalog).context("loading catalog")?;
    let ranked = FitRanker::from_config(config).rank_profession_subtypes(&user, &subtypes);

    let mut results = ranked.results.clone();
    sort_fit_results(&mut results, mode);
    let shown = limit.unwrap_or(results.len()).min(results.len());
    let rows: Vec<Value> = results
        .iter()
        .take(shown)
        .enumerate()
        .map(|(i, r)| summary_row(i + 1, r))
        .collect();

    let mut text = format!("{} subtypes ranked by {mode}\n", results.len());
    for (i, r) in results.iter().take(shown).enumerate() {
        let _ = writeln!(
            text,
            "{:>3}. {} / {}  mismatch {:.2} (raw {:.2})  drain {:.2}",
            i + 1,
            r.major,
            r.name,
            r.total_mismatch_adjusted,
            r.total_mismatch_raw,
            r.total_drained_energy,
        );
    }

    Ok(Output {
        data: json!({
            "sort": mode,
            "count": results.len(),
            "shown": shown,
            "results": rows,
            "top": ranked.top.iter().map(label).collect::<Vec<_>>(),
            "bottom": ranked.bottom.iter().map(label).collect::<Vec<_>>(),
        }),
        text,
    })
}

pub fn cmd_custom(
    config: &EngineConfig,
    answers: &Path,
    name: &str,
    major: Option<&str>,
    demand: &[String],
) -> Result<Output> {
    let demand = parse_demand(demand)?;
    let user = load_user(answers)?;
    let fit = FitRanker::from_config(config).simulate_custom_job_fit(&user, name, &demand, major);

    let mut text = format!(
        "{} / {}\nmismatch {:.2} (raw {:.2})  drain {:.2}\n",
        fit.major, fit.name, fit.total_mismatch_adjusted, fit.total_mismatch_raw, fit.total_drained_energy
    );
    text.push_str(&render_gaps(&fit.prof_demand, &fit.surface_adjusted_aspired));
    if let Some((drive, gap)) = fit.mismatch_adjusted.largest_gap() {
        let _ = writeln!(text, "largest gap: {drive} ({gap:.2})");
    }

    let data = serde_json::to_value(&fit).context("serializing fit")?;
    Ok(Output { data, text })
}

/// Parses `Drive=value` pairs; a repeated drive keeps the last value.
pub fn parse_demand(pairs: &[String]) -> Result<BTreeMap<Drive, f64>> {
    let mut demand = BTreeMap::new();
    for pair in pairs {
        let (drive, value) = pair
            .split_once('=')
            .ok_or_else(|| UsageError(format!("expected DRIVE=VALUE, got {pair:?}")))?;
        let drive: Drive = drive.parse().map_err(fit_ranker::FitError::from)?;
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| UsageError(format!("invalid demand value for {drive}: {value:?}")))?;
        demand.insert(drive, value);
    }
    Ok(demand)
}

fn label(fit: &FitResult) -> Value {
    json!({ "major": fit.major, "name": fit.name })
}

fn summary_row(rank: usize, fit: &FitResult) -> Value {
    json!({
        "rank": rank,
        "major": fit.major,
        "name": fit.name,
        "total_mismatch_adjusted": round3(fit.total_mismatch_adjusted),
        "total_mismatch_raw": round3(fit.total_mismatch_raw),
        "total_drained_energy": round3(fit.total_drained_energy),
        "overall": round3(fit.overall_score()),
    })
}

fn render_routes(routes: &RouteSet) -> String {
    if routes.is_empty() {
        return "no instrumentation routes\n".to_string();
    }
    let mut out = format!("{} instrumentation routes\n", routes.len());
    for r in routes {
        let _ = writeln!(
            out,
            "  {} -> {} [{:?}] diversion {:.2} loss {:.2} drain {:.2}",
            r.source, r.target, r.kind, r.diversion_ratio, r.loss_ratio, r.path_drain
        );
    }
    out
}

fn render_gaps(demand: &DriveVector, surface: &DriveVector) -> String {
    let mut out = String::new();
    for drive in Drive::ALL {
        let _ = writeln!(
            out,
            "  {:<12} demand {:>4.1}  effective {:>5.2}",
            drive.name(),
            demand[drive],
            surface[drive]
        );
    }
    out
}
