//! `placeboard seasons`.

use anyhow::{Context, Result};
use placeboard_core::api::ApiClient;
use placeboard_core::config::Config;
use placeboard_core::seasons::{self, SeasonOption};

use super::table;

pub async fn run(config: &Config, from: Option<i32>, to: Option<i32>) -> Result<()> {
    let (default_from, default_to) =
        seasons::default_year_range(seasons::current_year(), config.year_span);
    let range = (from.unwrap_or(default_from), to.unwrap_or(default_to));

    let client = ApiClient::from_config(config)?;
    let summaries = client.list_seasons().await.context("list seasons")?;
    let options = seasons::filter_year_range(&seasons::build_options(summaries), range);

    print!("{}", render(&options, range));
    Ok(())
}

pub(crate) fn render(options: &[SeasonOption], (from, to): (i32, i32)) -> String {
    if options.is_empty() {
        return format!("No seasons between {from} and {to}\n");
    }
    let rows = options
        .iter()
        .map(|o| vec![o.label.clone(), o.id.clone()]);
    format!("{}\n", table(&["Season", "ID"], rows))
}

#[cfg(test)]
mod tests {
    use placeboard_types::SeasonType;

    use super::*;

    #[test]
    fn test_render_empty_names_range() {
        assert_eq!(render(&[], (2020, 2025)), "No seasons between 2020 and 2025\n");
    }

    #[test]
    fn test_render_lists_label_and_id() {
        let out = render(
            &[SeasonOption {
                id: "s-1".to_string(),
                label: "Placement 2024".to_string(),
                season_type: SeasonType::Placement,
                year: 2024,
            }],
            (2020, 2025),
        );
        assert!(out.contains("Placement 2024"));
        assert!(out.contains("s-1"));
    }
}
