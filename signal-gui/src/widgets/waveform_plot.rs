//! # Waveform Plot Widget
//!
//! Draws one [`PlotPanel`] on an Iced canvas: a framed plot area with a
//! dashed grid, tick labels, the panel title, every curve as a polyline and,
//! when the panel asks for it, a legend in the top-right corner.

use iced::widget::canvas::{self, Frame, Geometry, LineDash, Path, Stroke, Text};
use iced::widget::container;
use iced::{alignment, mouse, Color, Element, Point, Rectangle, Renderer, Size, Theme};
use signal_core::plot::{PlotPanel, Rgb};

/// Space around the plot area for the title and tick labels.
const MARGIN_LEFT: f32 = 58.0;
const MARGIN_RIGHT: f32 = 14.0;
const MARGIN_TOP: f32 = 40.0;
const MARGIN_BOTTOM: f32 = 34.0;

/// Number of grid divisions along each axis.
const GRID_DIVISIONS: usize = 4;

const TITLE_SIZE: f32 = 13.0;
const LABEL_SIZE: f32 = 11.0;

const GRID_DASH: [f32; 2] = [4.0, 4.0];

fn to_color(rgb: Rgb) -> Color {
    Color::from_rgb8(rgb.0, rgb.1, rgb.2)
}

/// Canvas widget for a single subplot.
pub struct WaveformPlot {
    panel: PlotPanel,
}

impl WaveformPlot {
    pub fn new(panel: PlotPanel) -> Self {
        Self { panel }
    }

    pub fn view(self, height: f32) -> Element<'static, crate::Message> {
        container(
            canvas::Canvas::new(self)
                .width(iced::Length::Fill)
                .height(iced::Length::Fixed(height)),
        )
        .into()
    }
}

/// Maps data coordinates into the plot rectangle.
struct Transform {
    area: Rectangle,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl Transform {
    fn point(&self, x: f64, y: f64) -> Point {
        let (x0, x1) = self.x_range;
        let (y0, y1) = self.y_range;
        let fx = if x1 > x0 { (x - x0) / (x1 - x0) } else { 0.0 };
        let fy = if y1 > y0 { (y - y0) / (y1 - y0) } else { 0.5 };
        Point::new(
            self.area.x + fx as f32 * self.area.width,
            self.area.y + (1.0 - fy as f32) * self.area.height,
        )
    }
}

impl<Message> canvas::Program<Message> for WaveformPlot {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let text_color = theme.palette().text;

        if !bounds.width.is_finite() || !bounds.height.is_finite() {
            return vec![frame.into_geometry()];
        }

        draw_title(&mut frame, &self.panel.title, bounds.width, text_color);

        let area = Rectangle {
            x: MARGIN_LEFT,
            y: MARGIN_TOP,
            width: (bounds.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (bounds.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
        };

        let frame_path = Path::rectangle(Point::new(area.x, area.y), Size::new(area.width, area.height));
        frame.fill(&frame_path, Color::from_rgba8(0x20, 0x20, 0x20, 0.6));
        frame.stroke(
            &frame_path,
            Stroke::default().with_width(1.0).with_color(Color::from_rgb8(0x80, 0x80, 0x80)),
        );

        let (Some(x_range), Some(y_range)) = (self.panel.x_range(), self.panel.y_range()) else {
            let placeholder = Text {
                content: "No data".to_string(),
                position: Point::new(area.center_x(), area.center_y()),
                color: text_color,
                size: LABEL_SIZE.into(),
                horizontal_alignment: alignment::Horizontal::Center,
                vertical_alignment: alignment::Vertical::Center,
                ..Text::default()
            };
            frame.fill_text(placeholder);
            return vec![frame.into_geometry()];
        };

        let transform = Transform { area, x_range, y_range };
        draw_grid(&mut frame, &transform, text_color);
        draw_axis_labels(&mut frame, &self.panel, area, text_color);

        for curve in &self.panel.curves {
            let mut points = curve
                .xs
                .iter()
                .zip(&curve.ys)
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .map(|(&x, &y)| transform.point(x, y));
            let Some(first) = points.next() else {
                continue;
            };
            let line = Path::new(|builder| {
                builder.move_to(first);
                for p in points {
                    builder.line_to(p);
                }
            });
            frame.stroke(
                &line,
                Stroke::default()
                    .with_width(curve.width)
                    .with_color(to_color(curve.color)),
            );
        }

        if self.panel.show_legend {
            draw_legend(&mut frame, &self.panel, area, text_color);
        }

        vec![frame.into_geometry()]
    }
}

fn draw_title(frame: &mut Frame, title: &str, width: f32, color: Color) {
    // Canvas text is laid out per line so two-line titles stay centered.
    for (i, line) in title.lines().enumerate() {
        frame.fill_text(Text {
            content: line.to_string(),
            position: Point::new(width / 2.0, 4.0 + i as f32 * (TITLE_SIZE + 3.0)),
            color,
            size: TITLE_SIZE.into(),
            horizontal_alignment: alignment::Horizontal::Center,
            vertical_alignment: alignment::Vertical::Top,
            ..Text::default()
        });
    }
}

fn draw_grid(frame: &mut Frame, transform: &Transform, text_color: Color) {
    let area = transform.area;
    let grid_stroke = Stroke {
        line_dash: LineDash {
            segments: &GRID_DASH,
            offset: 0,
        },
        ..Stroke::default()
            .with_width(1.0)
            .with_color(Color::from_rgba8(0xa0, 0xa0, 0xa0, 0.35))
    };

    let (x0, x1) = transform.x_range;
    let (y0, y1) = transform.y_range;

    for i in 0..=GRID_DIVISIONS {
        let f = i as f64 / GRID_DIVISIONS as f64;

        let x = x0 + f * (x1 - x0);
        let px = transform.point(x, y0).x;
        if i > 0 && i < GRID_DIVISIONS {
            frame.stroke(
                &Path::line(Point::new(px, area.y), Point::new(px, area.y + area.height)),
                grid_stroke.clone(),
            );
        }
        frame.fill_text(Text {
            content: format!("{:.2}", x),
            position: Point::new(px, area.y + area.height + 4.0),
            color: text_color,
            size: LABEL_SIZE.into(),
            horizontal_alignment: alignment::Horizontal::Center,
            vertical_alignment: alignment::Vertical::Top,
            ..Text::default()
        });

        let y = y0 + f * (y1 - y0);
        let py = transform.point(x0, y).y;
        if i > 0 && i < GRID_DIVISIONS {
            frame.stroke(
                &Path::line(Point::new(area.x, py), Point::new(area.x + area.width, py)),
                grid_stroke.clone(),
            );
        }
        frame.fill_text(Text {
            content: format!("{:.2}", y),
            position: Point::new(area.x - 6.0, py),
            color: text_color,
            size: LABEL_SIZE.into(),
            horizontal_alignment: alignment::Horizontal::Right,
            vertical_alignment: alignment::Vertical::Center,
            ..Text::default()
        });
    }
}

fn draw_axis_labels(frame: &mut Frame, panel: &PlotPanel, area: Rectangle, color: Color) {
    frame.fill_text(Text {
        content: panel.x_label.to_string(),
        position: Point::new(area.x + area.width, area.y + area.height + 18.0),
        color,
        size: LABEL_SIZE.into(),
        horizontal_alignment: alignment::Horizontal::Right,
        vertical_alignment: alignment::Vertical::Top,
        ..Text::default()
    });
    frame.fill_text(Text {
        content: panel.y_label.to_string(),
        position: Point::new(4.0, area.y - 4.0),
        color,
        size: LABEL_SIZE.into(),
        horizontal_alignment: alignment::Horizontal::Left,
        vertical_alignment: alignment::Vertical::Bottom,
        ..Text::default()
    });
}

fn draw_legend(frame: &mut Frame, panel: &PlotPanel, area: Rectangle, text_color: Color) {
    let line_height = LABEL_SIZE + 4.0;
    let width = 120.0;
    let height = panel.curves.len() as f32 * line_height + 8.0;
    let origin = Point::new(area.x + area.width - width - 6.0, area.y + 6.0);

    let background = Path::rectangle(origin, Size::new(width, height));
    frame.fill(&background, Color::from_rgba8(0x10, 0x10, 0x10, 0.8));

    for (i, curve) in panel.curves.iter().enumerate() {
        let y = origin.y + 4.0 + i as f32 * line_height + line_height / 2.0;
        frame.stroke(
            &Path::line(Point::new(origin.x + 6.0, y), Point::new(origin.x + 26.0, y)),
            Stroke::default().with_width(2.0).with_color(to_color(curve.color)),
        );
        frame.fill_text(Text {
            content: curve.label.clone(),
            position: Point::new(origin.x + 32.0, y),
            color: text_color,
            size: LABEL_SIZE.into(),
            horizontal_alignment: alignment::Horizontal::Left,
            vertical_alignment: alignment::Vertical::Center,
            ..Text::default()
        });
    }
}
