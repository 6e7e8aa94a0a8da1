//! Genome-browser view: locus selection plus an embedded igv.js browser.

use std::ops::RangeInclusive;

use axum::extract::State;
use axum_extra::extract::Query;
use axum::response::Html;
use minijinja::context;
use rotinet_table::{GeneTable, LocusSources};
use serde::Serialize;

use crate::error::ViewError;
use crate::link::{decode_node, NETWORK_PATH};
use crate::query::{number, GenomeQuery};
use crate::state::{AppState, SharedState};
use crate::templates;

pub const HEIGHT_RANGE: RangeInclusive<u32> = 300..=1000;
pub const DEFAULT_HEIGHT: u32 = 600;

/// `igv.createBrowser` options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IgvOptions {
    pub genome: IgvGenome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locus: Option<String>,
    pub tracks: Vec<IgvTrack>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IgvGenome {
    #[serde(rename = "fastaURL")]
    pub fasta_url: String,
    #[serde(rename = "indexURL")]
    pub index_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgvTrack {
    pub name: String,
    pub url: String,
    #[serde(rename = "indexURL")]
    pub index_url: String,
    pub format: String,
    pub display_mode: String,
}

impl IgvOptions {
    pub fn new(state: &AppState, locus: Option<&str>) -> Self {
        let genome = &state.config.genome;
        Self {
            genome: IgvGenome {
                fasta_url: state.asset_url(&genome.fasta),
                index_url: state.asset_url(&genome.fasta_index),
            },
            locus: locus.map(str::to_string),
            tracks: vec![IgvTrack {
                name: "Annotations (GFF3)".to_string(),
                url: state.asset_url(&genome.annotation),
                index_url: state.asset_url(&genome.annotation_index),
                format: "gff3".to_string(),
                display_mode: "EXPANDED".to_string(),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct GeneOption<'a> {
    value: &'a str,
    selected: bool,
}

pub async fn genome_browser(
    State(state): State<SharedState>,
    Query(params): Query<GenomeQuery>,
) -> Result<Html<String>, ViewError> {
    let node = decode_node(&params.node)?;
    let genes = state.genes.get()?;

    let auto = genes.resolve(&node);
    let gene = chosen_gene(&genes, &params, &node);
    let sources = LocusSources {
        auto: auto.clone(),
        dropdown: gene.and_then(|g| genes.resolve(g)),
        manual: params.locus.clone(),
    };
    let locus = sources.state();
    let height = browser_height(&params);

    let options: Vec<GeneOption> = genes
        .gene_names()
        .into_iter()
        .map(|g| GeneOption { value: g, selected: Some(g) == gene })
        .collect();
    let gene_rows: Vec<&[String]> = gene
        .map(|g| genes.rows_for(g).map(|r| r.cells.as_slice()).collect())
        .unwrap_or_default();

    let html = templates::render(
        "igv_browser.html",
        context! {
            title => format!("IGV Browser | {}", state.config.genome.name),
            genome_name => &state.config.genome.name,
            node => &node,
            auto_locus => auto,
            gene => gene.unwrap_or_default(),
            gene_options => options,
            gene_columns => genes.columns(),
            gene_rows => gene_rows,
            manual_locus => params.locus.as_deref().unwrap_or_default(),
            locus => &locus,
            display_locus => locus.locus(),
            height => height,
            height_range => [*HEIGHT_RANGE.start(), *HEIGHT_RANGE.end()],
            asset_base => &state.asset_base,
            igv => IgvOptions::new(&state, locus.locus()),
            back_url => NETWORK_PATH,
        },
    )?;
    Ok(Html(html))
}

/// Dropdown value: an explicit `gene` parameter (empty = none), otherwise
/// the node itself when it is a known locus tag.
fn chosen_gene<'a>(genes: &GeneTable, params: &'a GenomeQuery, node: &'a str) -> Option<&'a str> {
    match params.gene.first() {
        Some(g) => Some(g.as_str()).filter(|g| !g.is_empty()),
        None => genes.contains(node).then_some(node),
    }
}

pub fn browser_height(params: &GenomeQuery) -> u32 {
    number::<u32>(params.height.as_deref())
        .map(|h| h.clamp(*HEIGHT_RANGE.start(), *HEIGHT_RANGE.end()))
        .unwrap_or(DEFAULT_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::from_query;
    use rotinet_table::LocusState;
    use std::path::Path;

    fn genes() -> GeneTable {
        let tsv = "Locus tag\tAccession\tBegin\tEnd\n\
            AVAG_001\tCP075492.1\t20000\t30000\n\
            AVAG_002\tCP075492.1\t31000\t32500\n";
        GeneTable::from_reader(Path::new("genes.tsv"), tsv.as_bytes(), "Locus tag").unwrap()
    }

    #[test]
    fn test_gene_preselected_from_node() {
        let genes = genes();
        let none = GenomeQuery::default();
        assert_eq!(chosen_gene(&genes, &none, "AVAG_001"), Some("AVAG_001"));
        assert_eq!(chosen_gene(&genes, &none, "geneA"), None);

        let picked: GenomeQuery = from_query("gene=AVAG_002");
        assert_eq!(chosen_gene(&genes, &picked, "AVAG_001"), Some("AVAG_002"));
        let cleared: GenomeQuery = from_query("gene=");
        assert_eq!(chosen_gene(&genes, &cleared, "AVAG_001"), None);
    }

    #[test]
    fn test_auto_locus_wins_over_dropdown_and_manual() {
        let genes = genes();
        let sources = LocusSources {
            auto: genes.resolve("AVAG_001"),
            dropdown: genes.resolve("AVAG_002"),
            manual: Some("C:5-6".into()),
        };
        assert_eq!(sources.state(), LocusState::FromAuto("CP075492.1:20000-30000".into()));
    }

    #[test]
    fn test_height_is_clamped() {
        assert_eq!(browser_height(&GenomeQuery::default()), 600);
        assert_eq!(browser_height(&from_query("height=100")), 300);
        assert_eq!(browser_height(&from_query("height=5000")), 1000);
        assert_eq!(browser_height(&from_query("height=750")), 750);
        assert_eq!(browser_height(&from_query("height=tall")), 600);
    }
}
