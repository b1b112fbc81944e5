//! Plain-text rendering of the form.

use std::fmt::Write;

use zipcast_client::LocationOption;

use crate::state::FormState;

const TITLE: &str = "Weather Prediction";
const LEARN_MORE_LABEL: &str = "[Visit PM Accelerator]  (learn-more)";

/// Render every zone of the form for the current state.
pub fn render(state: &FormState) -> String {
    let mut out = String::new();
    let disabled = if state.is_loading() { "  (disabled)" } else { "" };
    let directory = state.directory();
    let location = state.location();

    let _ = writeln!(out, "{LEARN_MORE_LABEL}");
    let _ = writeln!(out);
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{}", "=".repeat(TITLE.len()));

    let zip = if state.zip().is_empty() {
        "Enter ZIP code"
    } else {
        state.zip()
    };
    let _ = writeln!(out, "ZIP Code:   {zip}{disabled}");

    let country = selected_label(&directory.countries, &location.country)
        .unwrap_or("Select a country...");
    let _ = writeln!(out, "Country:    {country}{disabled}");

    let town = selected_label(&directory.towns, &location.town)
        .unwrap_or("Select or type a town/city...");
    let _ = writeln!(out, "Town/City:  {town}{disabled}");

    let _ = writeln!(out);
    let button = if state.is_loading() {
        "[ Loading... ]"
    } else {
        "[ Get Prediction ]"
    };
    let _ = writeln!(out, "{button}");

    if let Some(report) = state.workflow().result() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Results");
        let _ = write!(out, "{report}");
    }

    if let Some(error) = state.workflow().error() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Error: {error}");
    }

    out
}

/// Label of the option whose value is `value`. A selector only shows
/// values it has an option for.
fn selected_label<'a>(options: &'a [LocationOption], value: &str) -> Option<&'a str> {
    if value.is_empty() {
        return None;
    }
    options
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.label.as_str())
}

/// Render a selector's option list for the `countries`/`towns` commands.
pub fn render_options(title: &str, options: &[LocationOption]) -> String {
    if options.is_empty() {
        return format!("No {} available.\n", title.to_lowercase());
    }

    let mut out = format!("{} ({}):\n", title, options.len());
    for option in options {
        let _ = writeln!(out, "  {}", option.label);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PredictionOutcome;
    use zipcast_client::{
        LocationDirectory, PredictionReport, ResolvedLocation, TemperatureSummary,
        TemperatureValue,
    };
    use zipcast_core::ForecastError;

    fn loaded() -> FormState {
        let mut state = FormState::new();
        state.finish_directory_load(Ok(LocationDirectory::from_raw(
            vec!["france".into()],
            vec!["paris".into()],
        )));
        state
    }

    #[test]
    fn idle_form_shows_placeholders() {
        let text = render(&loaded());
        assert!(text.contains("ZIP Code:   Enter ZIP code\n"));
        assert!(text.contains("Country:    Select a country...\n"));
        assert!(text.contains("[ Get Prediction ]"));
        assert!(!text.contains("Results"));
        assert!(!text.contains("Error:"));
    }

    #[test]
    fn selections_render_labels() {
        let mut state = loaded();
        state.select_country(Some("france"));
        state.select_town(Some("paris"));

        let text = render(&state);
        assert!(text.contains("Country:    France\n"));
        assert!(text.contains("Town/City:  Paris\n"));
    }

    #[test]
    fn loading_disables_controls() {
        let mut state = loaded();
        state.set_zip("75001");
        state.begin_prediction();

        let text = render(&state);
        assert!(text.contains("[ Loading... ]"));
        assert_eq!(text.matches("(disabled)").count(), 3);
    }

    #[test]
    fn result_block_rendered() {
        let mut state = loaded();
        state.select_town(Some("paris"));
        state.begin_prediction();
        state.finish_prediction(PredictionOutcome {
            resolved: None,
            result: Ok(PredictionReport::new(
                &ResolvedLocation::new("", "Paris"),
                TemperatureSummary {
                    average: TemperatureValue::Number(15.0),
                    max: TemperatureValue::Number(20.0),
                    min: TemperatureValue::Number(10.0),
                    data_points: None,
                },
            )),
        });

        let text = render(&state);
        assert!(text.ends_with(
            "Results\nPrediction for Paris:\nMaximum Temperature: 20\nAverage Temperature: 15\nMinimum Temperature: 10\n"
        ));
    }

    #[test]
    fn error_block_rendered() {
        let mut state = loaded();
        state.select_country(Some("france"));
        state.begin_prediction();
        state.finish_prediction(PredictionOutcome {
            resolved: None,
            result: Err(ForecastError::prediction_failed(Some(
                "No valid temperature data available",
            ))),
        });

        let text = render(&state);
        assert!(text.ends_with("Error: No valid temperature data available\n"));
        assert!(!text.contains("Results"));
    }

    #[test]
    fn option_list() {
        let options = vec![LocationOption::from_raw("france"), LocationOption::from_raw("spain")];
        assert_eq!(
            render_options("Countries", &options),
            "Countries (2):\n  France\n  Spain\n"
        );
        assert_eq!(render_options("Towns", &[]), "No towns available.\n");
    }
}
