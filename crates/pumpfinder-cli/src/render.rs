//! Turns a [`ViewState`] snapshot into something printable.
//!
//! Rendering is a pure function of the state: no I/O, no network, and the
//! same state always produces the same [`Screen`].

use clap::ValueEnum;
use pumpfinder_core::{NearestResult, PumpListResult, PumpResult, ViewState};
use serde::Serialize;

pub(crate) const LOADING_TEXT: &str = "Loading...";

/// How a [`Screen`] is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One visual element of a rendered screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub(crate) enum Element {
    Title {
        text: String,
    },
    Text {
        text: String,
    },
    /// A list row, keyed by the stringified pump id.
    Row {
        key: String,
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        distance: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub(crate) struct Screen {
    pub elements: Vec<Element>,
}

impl Screen {
    fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub(crate) fn to_text(&self) -> String {
        let mut out = String::new();
        for element in &self.elements {
            match element {
                Element::Title { text } | Element::Text { text } => {
                    out.push_str(text);
                    out.push('\n');
                }
                Element::Row { name, distance, .. } => {
                    out.push_str(name);
                    out.push('\n');
                    if let Some(d) = distance {
                        out.push_str("  ");
                        out.push_str(d);
                        out.push('\n');
                    }
                }
            }
        }
        out
    }

    /// # Errors
    ///
    /// Returns an error if the screen cannot be serialized.
    pub(crate) fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub(crate) fn format(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => self.to_json().map(|mut s| {
                s.push('\n');
                s
            }),
        }
    }
}

/// The window of list rows that gets materialised.
///
/// `height: None` shows every row from `offset` on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Viewport {
    pub offset: usize,
    pub height: Option<usize>,
}

impl Viewport {
    fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset.min(items.len());
        let end = self
            .height
            .map_or(items.len(), |h| start.saturating_add(h).min(items.len()));
        &items[start..end]
    }
}

/// A result shape that knows how to lay itself out.
trait Render {
    fn render(&self, viewport: Viewport, screen: &mut Screen);
}

impl Render for NearestResult {
    fn render(&self, _viewport: Viewport, screen: &mut Screen) {
        screen.push(Element::Title {
            text: self.pump.name.clone(),
        });
        screen.push(Element::Text {
            text: format!("{} meters away", format_distance(self.distance)),
        });
    }
}

impl Render for PumpListResult {
    fn render(&self, viewport: Viewport, screen: &mut Screen) {
        for pump in viewport.window(&self.pumps) {
            screen.push(Element::Row {
                key: pump.id.to_string(),
                name: pump.name.clone(),
                distance: pump.distance.map(|d| format!("{} m away", format_distance(d))),
            });
        }
    }
}

impl Render for PumpResult {
    fn render(&self, viewport: Viewport, screen: &mut Screen) {
        match self {
            PumpResult::Nearest(r) => r.render(viewport, screen),
            PumpResult::List(r) => r.render(viewport, screen),
        }
    }
}

/// Shortest representation that round-trips, so `5.0` prints as `5` and
/// `42.5` as `42.5`.
fn format_distance(meters: f64) -> String {
    meters.to_string()
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Renderer {
    viewport: Viewport,
}

impl Renderer {
    pub(crate) const fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    pub(crate) fn render(&self, state: &ViewState) -> Screen {
        let mut screen = Screen::default();
        match state {
            ViewState::Loading => screen.push(Element::Text {
                text: LOADING_TEXT.to_string(),
            }),
            ViewState::Error(e) => screen.push(Element::Text {
                text: e.to_string(),
            }),
            ViewState::Ready(result) => result.render(self.viewport, &mut screen),
        }
        screen
    }
}
