use std::{env, fs};

use anyhow::{Context, Result, bail};
use log::info;
use objective::{
    building::{EngineBuilder, Setup},
    function::DifferentiableFunction,
};
use specs::EngineSpec;

fn main() -> Result<()> {
    env_logger::init();

    let Some(path) = env::args().nth(1) else {
        bail!("usage: seqfit <engine-spec.json>");
    };

    let text = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let spec: EngineSpec =
        serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;

    let Setup {
        mut function,
        start,
    } = EngineBuilder::new()
        .build(&spec)
        .context("building the objective function")?;

    info!(dimension = function.dimension(), threads = spec.threads; "evaluating starting point");

    let value = function.evaluate(&start)?;
    let gradient = function.gradient(&start)?;
    let norm = gradient.iter().map(|g| g * g).sum::<f64>().sqrt();

    println!("dimension      {}", function.dimension());
    println!("objective      {value}");
    println!("gradient norm  {norm}");
    println!("class weights  {:?}", function.class_weights().probabilities());

    Ok(())
}
