//! Background layer standing in for the looping condition video

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Paragraph, Widget},
    Frame,
};
use skycast_core::{Asset, AssetCatalog, ConditionKey, TimeOfDay};

use crate::component::Component;

/// Props for Backdrop
pub struct BackdropProps<'a> {
    /// Current asset; `None` before the first report arrives
    pub asset: Option<&'a Asset>,
    pub catalog: &'a AssetCatalog,
}

/// Tints the whole screen by condition and names the video that would play
#[derive(Default)]
pub struct Backdrop;

impl Backdrop {
    /// Background tint for an asset
    pub fn tint(asset: &Asset) -> Color {
        let day = asset.time_of_day == TimeOfDay::Day;
        match (&asset.condition, day) {
            (ConditionKey::Clear, true) => Color::Rgb(40, 90, 150),
            (ConditionKey::Clear, false) => Color::Rgb(10, 15, 40),
            (ConditionKey::Rain | ConditionKey::Drizzle, true) => Color::Rgb(50, 65, 80),
            (ConditionKey::Rain | ConditionKey::Drizzle, false) => Color::Rgb(20, 28, 38),
            (ConditionKey::Thunderstorm | ConditionKey::Squall | ConditionKey::Tornado, true) => {
                Color::Rgb(55, 50, 70)
            }
            (ConditionKey::Thunderstorm | ConditionKey::Squall | ConditionKey::Tornado, false) => {
                Color::Rgb(25, 20, 35)
            }
            (ConditionKey::Snow, true) => Color::Rgb(120, 130, 145),
            (ConditionKey::Snow, false) => Color::Rgb(45, 50, 60),
            (
                ConditionKey::Haze
                | ConditionKey::Fog
                | ConditionKey::Mist
                | ConditionKey::Smoke
                | ConditionKey::Dust
                | ConditionKey::Ash
                | ConditionKey::Sand,
                true,
            ) => Color::Rgb(95, 90, 80),
            (_, true) => Color::Rgb(70, 80, 95),
            (_, false) => Color::Rgb(25, 28, 36),
        }
    }

    fn caption(asset: &Asset, catalog: &AssetCatalog) -> String {
        let time = match asset.time_of_day {
            TimeOfDay::Day => "day",
            TimeOfDay::Night => "night",
        };
        format!("▶ {} ({})", catalog.path_of(asset).display(), time)
    }
}

/// Fills an area with a background color
struct Fill(Color);

impl Widget for Fill {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.0));
    }
}

impl<A> Component<A> for Backdrop {
    type Props<'a> = BackdropProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(asset) = props.asset else {
            return;
        };
        let tint = Self::tint(asset);
        frame.render_widget(Fill(tint), area);

        if area.height == 0 {
            return;
        }
        let caption_area = Rect {
            y: area.y + area.height - 1,
            height: 1,
            ..area
        };
        let caption = Paragraph::new(Line::raw(Self::caption(asset, props.catalog)))
            .style(Style::default().fg(Color::Gray).bg(tint))
            .alignment(Alignment::Right);
        frame.render_widget(caption, caption_area);
    }
}
