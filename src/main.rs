use anyhow::{Context, Result};
use bayesnet::common::DemoQuery;
use bayesnet::common::report::{EstimateRecord, InferenceReport};
use bayesnet::common::setup::{CommandLineOptions, parse_configuration_options};
use bayesnet::estimate::conditional_frequency;
use bayesnet::inference::{InferenceMethod, Sampler};
use bayesnet::network::{BayesNetwork, NetworkSpec, Query};
use bayesnet::scenarios::ScenarioMakerFactory;
use bayesnet::scenarios::wet_grass::PLAYING_EXAMPLES;
use bayesnet::{print_blue, print_green, print_red, print_yellow};
use log::info;
use std::time::Instant;

const DEFAULT_SAMPLES: usize = 10_000;

fn load_network(options: &CommandLineOptions) -> Result<(BayesNetwork, Vec<DemoQuery>)> {
    if let Some(path) = &options.network_file {
        let spec = NetworkSpec::from_json_file(path)
            .with_context(|| format!("Failed to read network definition {}", path))?;
        let network = BayesNetwork::from_spec(&spec)?;
        return Ok((network, Vec::new()));
    }
    let scenario = ScenarioMakerFactory::new_shared(&options.scenario_name)?;
    let network = scenario.build_network()?;
    let demo_queries = scenario.demo_queries(&network)?;
    Ok((network, demo_queries))
}

fn selected_queries(
    options: &CommandLineOptions,
    network: &BayesNetwork,
    demo_queries: Vec<DemoQuery>,
) -> Result<Vec<DemoQuery>> {
    match &options.query {
        Some(name) => {
            let observed: Vec<(&str, bool)> = options
                .evidence
                .iter()
                .map(|(node, value)| (node.as_str(), *value))
                .collect();
            let query = Query::by_name(network, name, &observed)?;
            Ok(vec![DemoQuery {
                label: query.describe(network),
                query,
                samples: options.samples.unwrap_or(DEFAULT_SAMPLES),
            }])
        }
        None if demo_queries.is_empty() => {
            anyhow::bail!("network '{}' has no demo queries, pass --query", network.name())
        }
        None => Ok(demo_queries
            .into_iter()
            .map(|demo| DemoQuery {
                samples: options.samples.unwrap_or(demo.samples),
                ..demo
            })
            .collect()),
    }
}

fn main() -> Result<()> {
    let options = parse_configuration_options()?;
    let (network, demo_queries) = load_network(&options)?;
    info!("Using network '{}' with {} nodes", network.name(), network.len());

    if options.network_file.is_none() && options.scenario_name == "wet_grass" {
        let [raining, dry] = conditional_frequency(&PLAYING_EXAMPLES)?;
        print_green!("When it is raining, I play outside {:.5}% of the time.", raining * 100.0);
        print_green!("When it is not raining, I play outside {:.5}% of the time.", dry * 100.0);
        println!();
    }

    let sampler = Sampler::new(&network, options.sampling.clone())?;
    let mut rng = options.sampling.rng()?;

    for _ in 0..options.prior_samples {
        let sample = sampler.prior_sample(&mut rng);
        println!("{}", network.render_assignment(&sample));
    }

    let queries = selected_queries(&options, &network, demo_queries)?;
    let methods = match options.method {
        Some(method) => vec![method],
        None => InferenceMethod::ALL.to_vec(),
    };

    let mut report = InferenceReport::new(network.name(), options.sampling.clone());
    for method in methods {
        print_blue!("\n{}", method);
        for demo in &queries {
            let started = Instant::now();
            let outcome = sampler.estimate(method, &demo.query, demo.samples, &mut rng);
            let elapsed_ms = started.elapsed().as_millis() as u64;
            match &outcome {
                Ok(probability) => {
                    println!("{} = {:.5}", demo.label, probability);
                }
                Err(e) if e.is_undefined_estimate() => {
                    print_yellow!("{} is undefined: {}", demo.label, e);
                }
                Err(e) => {
                    print_red!("{} failed: {}", demo.label, e);
                }
            }
            report.push(EstimateRecord {
                method,
                query: demo.query.describe(&network),
                samples: demo.samples,
                probability: outcome.as_ref().ok().copied(),
                error: outcome.as_ref().err().map(|e| e.to_string()),
                elapsed_ms,
            });
        }
    }

    if let Some(path) = &options.report_file {
        report
            .save_to_file(path)
            .with_context(|| format!("Failed to write report to {}", path))?;
        info!("Wrote {} estimates to {}", report.estimates.len(), path);
    }
    Ok(())
}
