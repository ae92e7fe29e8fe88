// src/prompt.rs
//! Interactive front-end. Runs only when `new` received no feature intent;
//! produces the same raw-options shape the resolver expects. Feature
//! toggles go through the closed `Feature` enumeration as (feature,
//! enabled) pairs rather than dynamically-keyed assignment.

use dialoguer::{theme::ColorfulTheme, Confirm, MultiSelect, Select};

use crate::error::ExgenError;
use crate::options::{Feature, RawOptions};
use crate::validate::{CSS_ENGINES, VIEW_ENGINES};

pub fn gather() -> Result<RawOptions, ExgenError> {
  let theme = ColorfulTheme::default();
  let mut raw = RawOptions::default();

  println!("No feature flags supplied; configure the project interactively:");

  if Confirm::with_theme(&theme)
    .with_prompt("Use TypeScript?")
    .default(false)
    .interact()?
  {
    raw.typescript = true;
  } else {
    raw.javascript = true;
  }

  if Confirm::with_theme(&theme)
    .with_prompt("Include a view engine?")
    .default(true)
    .interact()?
  {
    let view_selection = Select::with_theme(&theme)
      .with_prompt("Select a view engine")
      .items(&VIEW_ENGINES)
      .default(0)
      .interact()?;
    raw.view = Some(VIEW_ENGINES[view_selection].to_string());

    let css_selection = Select::with_theme(&theme)
      .with_prompt("Select a CSS engine")
      .items(&CSS_ENGINES)
      .default(0)
      .interact()?;
    raw.css = Some(CSS_ENGINES[css_selection].to_string());
  } else {
    raw.no_view = true;
  }

  let labels: Vec<&str> = Feature::ALL.iter().map(|f| f.label()).collect();
  let chosen = MultiSelect::with_theme(&theme)
    .with_prompt("Select features (space to toggle, enter to confirm)")
    .items(&labels)
    .interact()?;

  let toggles: Vec<(Feature, bool)> = Feature::ALL
    .iter()
    .enumerate()
    .map(|(index, feature)| (*feature, chosen.contains(&index)))
    .collect();
  for (feature, enabled) in toggles {
    feature.apply(enabled, &mut raw);
  }

  Ok(raw)
}
