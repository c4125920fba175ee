//! The plot command: one figure per (sample, estimator, variable).

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use mp_core::{Algo, Sample, Variable, algos_for_sample, lookup_sample};
use mp_render::config::{VizConfig, resolve_config};
use mp_render::render_to_file;
use mp_render::theme::BuiltinTheme;
use mp_resolution::{ResolutionArtifact, compute_resolution, events::load_events};

pub struct PlotArgs {
    pub samples: Vec<String>,
    pub estimators: Vec<String>,
    pub vars: Vec<String>,
    pub dir: PathBuf,
    pub out_dir: PathBuf,
    pub formats: Vec<String>,
    pub halve_algo: Option<String>,
    pub theme: String,
    pub style: Option<PathBuf>,
}

pub fn run(args: PlotArgs) -> Result<()> {
    let config = load_style(&args)?;

    for sample_id in &args.samples {
        let sample = lookup_sample(sample_id);
        tracing::info!(sample = %sample.name, "analysing sample");
        for estimator in &args.estimators {
            for var_id in &args.vars {
                let Some(var) = Variable::parse(var_id) else {
                    bail!(
                        "unknown variable '{var_id}' (choose from photon, tau, muon, electron, \
                         jet, nvtx, HT)"
                    );
                };
                make_plot(&sample, estimator, var, &args, &config)
                    .with_context(|| format!("sample '{sample_id}', variable '{var_id}'"))?;
            }
        }
    }
    Ok(())
}

fn load_style(args: &PlotArgs) -> Result<VizConfig> {
    match &args.style {
        Some(path) => {
            let yaml = std::fs::read_to_string(path)
                .with_context(|| format!("reading style config {}", path.display()))?;
            Ok(resolve_config(Some(&yaml))?)
        }
        None => Ok(BuiltinTheme::parse(&args.theme).base_config()),
    }
}

fn make_plot(
    sample: &Sample,
    estimator: &str,
    var: Variable,
    args: &PlotArgs,
    config: &VizConfig,
) -> Result<()> {
    let mut algos = algos_for_sample(sample);
    if let Some(halve) = &args.halve_algo {
        apply_halve_flag(&mut algos, halve)?;
    }

    let table = load_events(&args.dir, sample, &algos, var)?;
    let artifact = compute_resolution(&table, sample, &algos, var, estimator)?;

    if var == Variable::Nvtx && estimator == "std" {
        log_vertex_summary(&artifact);
    }

    let stem = if var == Variable::Ht {
        format!("{}_{estimator}", sample.name)
    } else {
        format!("{}_{estimator}_{}", sample.name, var.id())
    };
    for format in &args.formats {
        let path = args.out_dir.join(format!("{stem}.{format}"));
        render_to_file(&artifact, &path, config)?;
        tracing::info!(path = %path.display(), "wrote figure");
    }
    Ok(())
}

fn apply_halve_flag(algos: &mut [Algo], name: &str) -> Result<()> {
    let Some(algo) = algos.iter_mut().find(|a| a.label == name || a.branch == name) else {
        bail!("--halve-algo '{name}' matches no algorithm of this sample");
    };
    algo.halve = true;
    algo.label = format!("{}/2", algo.label);
    Ok(())
}

/// The pileup-dependence summary the vertex-count plots are made for: the
/// resolution delta between the 5-10 and 35-40 vertex bins.
fn log_vertex_summary(artifact: &ResolutionArtifact) {
    for series in &artifact.series {
        if let (Some(&low), Some(&high)) = (series.values.first(), series.values.get(6)) {
            tracing::info!(
                algo = %series.label,
                "5-10 bin {low:.2} 35-40 bin {high:.2} Delta {:.1}",
                high - low
            );
        }
    }
}
