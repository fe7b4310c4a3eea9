//! Text rendering and graph export module

use anyhow::Result;
use itertools::Itertools;
use crate::community::Community;
use crate::forest::{SocialForest, UserId};
use crate::sentiment::SentimentReport;
use crate::traversal::TreeLine;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Indented tree, one user per line
pub fn format_tree(lines: &[TreeLine], indent_width: usize) -> String {
    lines
        .iter()
        .map(|line| format!("{}{}", " ".repeat(line.depth * indent_width), line.label))
        .join("\n")
}

/// Communities as bracketed label lists
pub fn format_communities(communities: &[Vec<String>]) -> String {
    let inner = communities
        .iter()
        .map(|labels| format!("[{}]", labels.iter().map(|l| format!("'{}'", l)).join(", ")))
        .join(", ");
    format!("[{}]", inner)
}

/// Degree centrality as `{id: degree, ...}`
pub fn format_centrality(centrality: &[(UserId, usize)]) -> String {
    let inner = centrality
        .iter()
        .map(|(id, degree)| format!("{}: {}", id, degree))
        .join(", ");
    format!("{{{}}}", inner)
}

/// Two lines per interaction: the pair, then its scores
pub fn format_sentiments(forest: &SocialForest, report: &SentimentReport) -> String {
    let name = |id: UserId| {
        forest
            .label(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    };

    report
        .iter()
        .map(|entry| {
            format!(
                "Interaction from {} to {}:\n  Polarity: {:.2}, Subjectivity: {:.2}",
                name(entry.sender),
                name(entry.recipient),
                entry.score.polarity as f64,
                entry.score.subjectivity
            )
        })
        .join("\n")
}

/// Write GraphML and CSV exports of the forest into `output_dir/visualizations`
pub fn generate_visualizations(
    forest: &SocialForest,
    communities: &[Community],
    output_dir: &str,
) -> Result<()> {
    log::info!("Generating visualizations for {} users", forest.len());

    let viz_dir = Path::new(output_dir).join("visualizations");
    fs::create_dir_all(&viz_dir)?;

    write_graphml(forest, communities, &viz_dir.join("forest.graphml"))?;
    write_nodes_csv(forest, communities, &viz_dir.join("nodes.csv"))?;

    log::info!("Visualizations generated successfully");

    Ok(())
}

fn community_of(communities: &[Community]) -> HashMap<UserId, u32> {
    communities
        .iter()
        .flat_map(|c| c.members.iter().map(move |&id| (id, c.id)))
        .collect()
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// GraphML document with one directed edge per parent -> child link
pub fn write_graphml(forest: &SocialForest, communities: &[Community], path: &Path) -> Result<()> {
    let membership = community_of(communities);
    let mut file = File::create(path)?;

    writeln!(file, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(file, "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\">")?;
    writeln!(file, "  <key id=\"label\" for=\"node\" attr.name=\"label\" attr.type=\"string\"/>")?;
    writeln!(file, "  <key id=\"community\" for=\"node\" attr.name=\"community\" attr.type=\"int\"/>")?;
    writeln!(file, "  <graph id=\"G\" edgedefault=\"directed\">")?;

    for node in forest.iter() {
        writeln!(file, "    <node id=\"n{}\">", node.id)?;
        writeln!(file, "      <data key=\"label\">{}</data>", escape_xml(&node.label))?;
        if let Some(community) = membership.get(&node.id) {
            writeln!(file, "      <data key=\"community\">{}</data>", community)?;
        }
        writeln!(file, "    </node>")?;
    }

    let mut edge_id = 0;
    for node in forest.iter() {
        for child in &node.children {
            writeln!(
                file,
                "    <edge id=\"e{}\" source=\"n{}\" target=\"n{}\"/>",
                edge_id, node.id, child
            )?;
            edge_id += 1;
        }
    }

    writeln!(file, "  </graph>")?;
    writeln!(file, "</graphml>")?;

    Ok(())
}

fn write_nodes_csv(forest: &SocialForest, communities: &[Community], path: &Path) -> Result<()> {
    let membership = community_of(communities);
    let mut file = File::create(path)?;

    writeln!(file, "id,label,parent,children,community_id")?;

    for node in forest.iter() {
        writeln!(
            file,
            "{},\"{}\",{},{},{}",
            node.id,
            node.label.replace('"', "\"\""),
            node.parent.map(|p| p.to_string()).unwrap_or_default(),
            node.child_count(),
            membership.get(&node.id).map(|c| c.to_string()).unwrap_or_default()
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::detection;
    use crate::config::Config;
    use crate::data::sample::sample_forest;
    use crate::sentiment::SentimentAnalyzer;
    use crate::traversal;

    #[test]
    fn tree_text_uses_indent_width() {
        let forest = sample_forest();
        let text = format_tree(&traversal::render(&forest), 2);
        assert_eq!(text, "Alice\n  Bob\n    David\n  Carol\n    Gabriel");
    }

    #[test]
    fn sentiment_text() {
        let forest = sample_forest();
        let report = SentimentAnalyzer::default().analyze(&forest);
        let text = format_sentiments(&forest, &report);
        assert_eq!(
            text,
            "Interaction from Alice to Bob:\n  Polarity: 1.00, Subjectivity: 0.00\n\
             Interaction from Bob to Carol:\n  Polarity: 0.00, Subjectivity: 0.00"
        );
    }

    #[test]
    fn unknown_recipient_falls_back_to_id() {
        let mut forest = sample_forest();
        forest.remove(3);
        let report = SentimentAnalyzer::default().analyze(&forest);
        assert!(format_sentiments(&forest, &report).contains("from Bob to 3:"));
    }

    #[test]
    fn communities_and_centrality_text() {
        let communities = vec![vec!["A".to_string(), "B".to_string()], vec!["C".to_string()]];
        assert_eq!(format_communities(&communities), "[['A', 'B'], ['C']]");
        assert_eq!(format_centrality(&[(1, 2), (2, 0)]), "{1: 2, 2: 0}");
    }

    #[test]
    fn exports_graphml_and_csv() {
        let mut forest = sample_forest();
        forest.insert(6, "<Zoe & co>", None);
        let communities = detection::detect(&forest, &Config::default());

        let dir = tempfile::tempdir().unwrap();
        generate_visualizations(&forest, &communities, dir.path().to_str().unwrap()).unwrap();

        let graphml = fs::read_to_string(dir.path().join("visualizations/forest.graphml")).unwrap();
        assert_eq!(graphml.matches("<edge ").count(), 4);
        assert!(graphml.contains("&lt;Zoe &amp; co&gt;"));

        let csv = fs::read_to_string(dir.path().join("visualizations/nodes.csv")).unwrap();
        assert_eq!(csv.lines().count(), 7);
        assert!(csv.contains("2,\"Bob\",1,1,0"));
        assert!(csv.contains("6,\"<Zoe & co>\",,0,1"));
    }
}
