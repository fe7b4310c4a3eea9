//! Results persistence module

use anyhow::Result;
use crate::community::Community;
use crate::forest::{SocialForest, UserId};
use crate::sentiment::SentimentReport;
use crate::traversal;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use serde_json::{json, to_string_pretty};
use statrs::statistics::Statistics;

/// Save analysis results to the specified directory
pub fn save_results(
    forest: &SocialForest,
    communities: &[Community],
    centrality: &[(UserId, usize)],
    report: &SentimentReport,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving {} communities to {}", communities.len(), output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_summary(forest, communities, report, output_dir)?;
    save_communities(communities, output_dir)?;
    save_centrality(forest, centrality, output_dir)?;
    save_sentiment(forest, report, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Mean and sample standard deviation, 0.0 where undefined
fn describe(values: &[f64]) -> (f64, f64) {
    match values.len() {
        0 => (0.0, 0.0),
        1 => (values[0], 0.0),
        _ => (values.iter().mean(), values.iter().std_dev()),
    }
}

/// Save summary information
fn save_summary(
    forest: &SocialForest,
    communities: &[Community],
    report: &SentimentReport,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving summary information");

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let polarities: Vec<f64> = report.iter().map(|e| e.score.polarity as f64).collect();
    let subjectivities: Vec<f64> = report.iter().map(|e| e.score.subjectivity).collect();
    let (polarity_mean, polarity_std) = describe(&polarities);
    let (subjectivity_mean, subjectivity_std) = describe(&subjectivities);

    let summary = json!({
        "forest_stats": {
            "user_count": forest.len(),
            "link_count": forest.edge_count(),
            "root_count": traversal::roots(forest).len(),
            "interaction_count": forest.interaction_count(),
        },
        "community_stats": {
            "community_count": communities.len(),
            "largest_community_size": communities.iter().map(|c| c.size).max().unwrap_or(0),
            "smallest_community_size": communities.iter().map(|c| c.size).min().unwrap_or(0),
            "avg_community_size": communities.iter().map(|c| c.size).sum::<usize>() as f64 /
                                  if communities.is_empty() { 1.0 } else { communities.len() as f64 },
        },
        "sentiment_stats": {
            "polarity_mean": polarity_mean,
            "polarity_std_dev": polarity_std,
            "subjectivity_mean": subjectivity_mean,
            "subjectivity_std_dev": subjectivity_std,
        }
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save every community with its members
fn save_communities(communities: &[Community], output_dir: &str) -> Result<()> {
    log::info!("Saving community information");

    let path = Path::new(output_dir).join("communities.json");
    let mut file = File::create(path)?;

    file.write_all(to_string_pretty(&json!({ "communities": communities }))?.as_bytes())?;

    Ok(())
}

/// Save degree centrality per user
fn save_centrality(
    forest: &SocialForest,
    centrality: &[(UserId, usize)],
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving degree centrality");

    let path = Path::new(output_dir).join("centrality.json");
    let mut file = File::create(path)?;

    let entries: Vec<_> = centrality
        .iter()
        .map(|&(id, degree)| {
            json!({
                "id": id,
                "label": forest.label(id),
                "degree": degree,
            })
        })
        .collect();

    file.write_all(to_string_pretty(&json!({ "degree_centrality": entries }))?.as_bytes())?;

    Ok(())
}

/// Save the sentiment of each interaction
fn save_sentiment(forest: &SocialForest, report: &SentimentReport, output_dir: &str) -> Result<()> {
    log::info!("Saving sentiment of {} interactions", report.len());

    let path = Path::new(output_dir).join("sentiment.json");
    let mut file = File::create(path)?;

    let entries: Vec<_> = report
        .iter()
        .map(|entry| {
            json!({
                "sender": entry.sender,
                "sender_label": forest.label(entry.sender),
                "recipient": entry.recipient,
                "recipient_label": forest.label(entry.recipient),
                "polarity": entry.score.polarity,
                "subjectivity": entry.score.subjectivity,
            })
        })
        .collect();

    file.write_all(to_string_pretty(&json!({ "interactions": entries }))?.as_bytes())?;

    Ok(())
}
