// SPDX-License-Identifier: MPL-2.0
//! Gallery screen component encapsulating state and update logic.
//!
//! The grid renders all three column layouts stacked; the pinch transition
//! level drives each layer's opacity and cell scale so the layouts
//! cross-fade while the gesture is in flight. Each layout keeps its own
//! scroll offset, translated when the pinch lands so the visible content
//! stays put.

use crate::config::{HEADER_HEIGHT, STORY_STRIP_HEIGHT};
use crate::gallery::{
    self, header_translation, layer_opacity, layer_scale, ColumnCount, PinchTransition,
};
use crate::i18n::fluent::I18n;
use crate::library::{LayoutEntry, Timeline};
use crate::media::ThumbnailCache;
use iced::widget::{
    button, container, image as iced_image, scrollable, text, Column, Row, Space, Stack,
};
use iced::{alignment, Element, Length};

/// Messages emitted by gallery widgets.
#[derive(Debug, Clone)]
pub enum Message {
    PinchChanged(f32),
    PinchEnded,
    PinchCancelled,
    /// The active layout scrolled to the given vertical offset.
    Scrolled(f32),
    /// A grid cell was tapped; the payload is the asset index.
    OpenMedia(usize),
    /// A story cover was tapped; the payload is the story index.
    OpenStory(usize),
}

/// Side effects the application performs after handling a gallery message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Open the full-screen viewer on the given asset.
    OpenViewer(usize),
    /// Start the story overlay for the given story.
    OpenStory(usize),
    /// The grid snapped to a new layout; persist it as the preference.
    ColumnsChanged(ColumnCount),
}

/// Gallery screen state: the pinch transition plus per-layout scroll.
pub struct GalleryScreen {
    columns: ColumnCount,
    transition: PinchTransition,
    /// One offset per layout, indexed by transition level.
    scroll_offsets: [f32; 3],
}

impl GalleryScreen {
    #[must_use]
    pub fn new(columns: ColumnCount) -> Self {
        Self {
            columns,
            transition: PinchTransition::new(columns),
            scroll_offsets: [0.0; 3],
        }
    }

    #[must_use]
    pub fn columns(&self) -> ColumnCount {
        self.columns
    }

    #[must_use]
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offsets[self.columns.level() as usize]
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::PinchChanged(scale) => {
                self.transition.pinch_changed(scale);
                Effect::None
            }
            Message::PinchEnded => {
                let landed = self.transition.pinch_ended();
                if landed != self.columns {
                    let offset = self.scroll_offsets[self.columns.level() as usize];
                    self.scroll_offsets[landed.level() as usize] =
                        gallery::translate_offset(offset, self.columns, landed);
                    self.columns = landed;
                    Effect::ColumnsChanged(landed)
                } else {
                    Effect::None
                }
            }
            Message::PinchCancelled => {
                self.transition.pinch_cancelled();
                Effect::None
            }
            Message::Scrolled(offset) => {
                self.scroll_offsets[self.columns.level() as usize] = offset.max(0.0);
                Effect::None
            }
            Message::OpenMedia(index) => Effect::OpenViewer(index),
            Message::OpenStory(index) => Effect::OpenStory(index),
        }
    }
}

/// Everything the gallery needs to render one frame.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub timeline: &'a Timeline,
    pub thumbs: &'a ThumbnailCache,
    /// Top safe-area inset in points (status bar on mobile targets).
    pub top_inset: f32,
}

impl GalleryScreen {
    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        if ctx.timeline.is_empty() {
            return container(text(ctx.i18n.tr("gallery-empty")))
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center)
                .into();
        }

        let level = self.transition.level();
        let mut layers = Stack::new();
        for layout_columns in ColumnCount::ALL {
            let opacity = layer_opacity(level, layout_columns);
            if opacity <= 0.0 {
                continue;
            }
            layers = layers.push(self.grid_layer(&ctx, layout_columns, opacity));
        }

        let mut page = Column::new();
        if let Some(header) = self.header(&ctx) {
            page = page.push(header);
        }
        if !ctx.timeline.stories.is_empty() {
            page = page.push(story_strip(&ctx));
        }
        page.push(layers).into()
    }

    /// Collapsing header: shrinks as the active layout scrolls past it.
    fn header<'a>(&self, ctx: &ViewContext<'a>) -> Option<Element<'a, Message>> {
        let translation =
            header_translation(self.scroll_offset(), HEADER_HEIGHT, ctx.top_inset);
        let visible_height = (HEADER_HEIGHT + ctx.top_inset + translation).max(0.0);
        if visible_height <= 0.0 {
            return None;
        }

        Some(
            container(text(ctx.i18n.tr("header-title")).size(24))
                .width(Length::Fill)
                .height(Length::Fixed(visible_height))
                .align_y(alignment::Vertical::Bottom)
                .padding(8)
                .into(),
        )
    }

    fn grid_layer<'a>(
        &'a self,
        ctx: &ViewContext<'a>,
        columns: ColumnCount,
        opacity: f32,
    ) -> Element<'a, Message> {
        let layout = match ctx.timeline.layout(columns.granularity()) {
            Some(layout) => layout,
            None => return Space::new(Length::Fill, Length::Fill).into(),
        };

        let per_row = usize::from(columns.count());
        let scale = layer_scale(self.transition.level(), columns);
        let mut grid = Column::new().spacing(2).width(Length::Fill);
        let mut row_cells: Vec<Element<'a, Message>> = Vec::with_capacity(per_row);

        for entry in &layout.entries {
            match entry {
                LayoutEntry::Header(label) => {
                    if !row_cells.is_empty() {
                        grid = grid.push(grid_row(row_cells.drain(..), per_row));
                    }
                    grid = grid.push(container(text(label).size(18)).padding(6));
                }
                LayoutEntry::Media(index) => {
                    row_cells.push(grid_cell(ctx, *index, opacity, scale));
                    if row_cells.len() == per_row {
                        grid = grid.push(grid_row(row_cells.drain(..), per_row));
                    }
                }
            }
        }
        if !row_cells.is_empty() {
            grid = grid.push(grid_row(row_cells.drain(..), per_row));
        }

        let is_active = columns == self.columns;
        let mut pane = scrollable(grid).width(Length::Fill).height(Length::Fill);
        if is_active {
            pane = pane.on_scroll(|viewport| Message::Scrolled(viewport.absolute_offset().y));
        }
        pane.into()
    }
}

fn grid_row<'a>(
    cells: impl Iterator<Item = Element<'a, Message>>,
    per_row: usize,
) -> Element<'a, Message> {
    let mut row = Row::new().spacing(2).width(Length::Fill);
    let mut count = 0;
    for cell in cells {
        row = row.push(cell);
        count += 1;
    }
    // Pad the trailing row so cells keep their column width.
    for _ in count..per_row {
        row = row.push(Space::new(Length::FillPortion(1), Length::Shrink));
    }
    row.into()
}

fn grid_cell<'a>(
    ctx: &ViewContext<'a>,
    index: usize,
    opacity: f32,
    scale: f32,
) -> Element<'a, Message> {
    let asset = &ctx.timeline.assets[index];
    let content: Element<'a, Message> = match ctx.thumbs.peek(&asset.path) {
        Some(thumb) => iced_image::Image::new(thumb.handle.clone())
            .width(Length::Fill)
            .opacity(opacity)
            .scale(scale)
            .into(),
        None => Space::new(Length::Fill, Length::Fixed(80.0)).into(),
    };

    button(content)
        .width(Length::FillPortion(1))
        .on_press(Message::OpenMedia(index))
        .into()
}

/// Horizontal strip of story covers above the grid.
fn story_strip<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let mut row = Row::new().spacing(8).padding(8);
    for (story_index, story) in ctx.timeline.stories.iter().enumerate() {
        let cover: Element<'a, Message> = story
            .asset_indices
            .first()
            .and_then(|&i| ctx.thumbs.peek(&ctx.timeline.assets[i].path))
            .map(|thumb| {
                iced_image::Image::new(thumb.handle.clone())
                    .width(Length::Fixed(STORY_STRIP_HEIGHT - 20.0))
                    .height(Length::Fixed(STORY_STRIP_HEIGHT - 20.0))
                    .into()
            })
            .unwrap_or_else(|| {
                Space::new(
                    Length::Fixed(STORY_STRIP_HEIGHT - 20.0),
                    Length::Fixed(STORY_STRIP_HEIGHT - 20.0),
                )
                .into()
            });

        row = row.push(
            button(Column::new().push(cover).push(text(&story.label).size(11)))
                .on_press(Message::OpenStory(story_index)),
        );
    }

    container(scrollable(row).direction(scrollable::Direction::Horizontal(
        scrollable::Scrollbar::new(),
    )))
    .width(Length::Fill)
    .height(Length::Fixed(STORY_STRIP_HEIGHT))
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn pinch_landing_on_a_new_layout_reports_the_change() {
        let mut screen = GalleryScreen::new(ColumnCount::Three);
        screen.update(Message::PinchChanged(2.0));
        assert_eq!(
            screen.update(Message::PinchEnded),
            Effect::ColumnsChanged(ColumnCount::Two)
        );
        assert_eq!(screen.columns(), ColumnCount::Two);
    }

    #[test]
    fn pinch_snapping_back_changes_nothing() {
        let mut screen = GalleryScreen::new(ColumnCount::Three);
        screen.update(Message::PinchChanged(1.05));
        assert_eq!(screen.update(Message::PinchEnded), Effect::None);
        assert_eq!(screen.columns(), ColumnCount::Three);
    }

    #[test]
    fn scroll_offset_follows_the_layout_switch() {
        let mut screen = GalleryScreen::new(ColumnCount::Two);
        screen.update(Message::Scrolled(400.0));

        screen.update(Message::PinchChanged(0.25));
        screen.update(Message::PinchEnded);

        assert_eq!(screen.columns(), ColumnCount::Four);
        // Four columns pack the same content into a quarter of the height.
        assert_abs_diff_eq!(screen.scroll_offset(), 100.0);
    }

    #[test]
    fn cancelled_pinch_keeps_layout_and_offset() {
        let mut screen = GalleryScreen::new(ColumnCount::Three);
        screen.update(Message::Scrolled(120.0));
        screen.update(Message::PinchChanged(3.0));
        screen.update(Message::PinchCancelled);

        assert_eq!(screen.columns(), ColumnCount::Three);
        assert_abs_diff_eq!(screen.scroll_offset(), 120.0);
    }

    #[test]
    fn taps_translate_to_effects() {
        let mut screen = GalleryScreen::new(ColumnCount::Two);
        assert_eq!(
            screen.update(Message::OpenMedia(7)),
            Effect::OpenViewer(7)
        );
        assert_eq!(screen.update(Message::OpenStory(1)), Effect::OpenStory(1));
    }
}
