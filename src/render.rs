// WHY: Presentation layer kept outside the pure annotator
// Hover wiring and markup consume segment lists and never feed back into matching

use anyhow::Result;

use crate::annotator::Segment;

/// Pointer position in consumer coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

impl Anchor {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Offset applied to the pointer so the tooltip sits beside the cursor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipPlacement {
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for TooltipPlacement {
    fn default() -> Self {
        Self {
            offset_x: 10.0,
            offset_y: 10.0,
        }
    }
}

impl TooltipPlacement {
    pub fn place(&self, pointer: Anchor) -> Anchor {
        Anchor::new(pointer.x + self.offset_x, pointer.y + self.offset_y)
    }
}

/// Callbacks a UI attaches to keyword segments
pub trait HoverHandler {
    /// Show `explanation` near `anchor`
    fn on_hover_start(&mut self, explanation: &str, anchor: Anchor);
    /// Hide the tooltip
    fn on_hover_end(&mut self);
}

/// Binds a segment list to a hover handler
///
/// Pointer events are addressed by segment index. Plain segments never show
/// a tooltip; at most one keyword tooltip is active at a time.
pub struct HoverAdapter<'s, H: HoverHandler> {
    segments: &'s [Segment<'s>],
    handler: H,
    placement: TooltipPlacement,
    active: Option<usize>,
}

impl<'s, H: HoverHandler> HoverAdapter<'s, H> {
    pub fn new(segments: &'s [Segment<'s>], handler: H) -> Self {
        Self {
            segments,
            handler,
            placement: TooltipPlacement::default(),
            active: None,
        }
    }

    pub fn with_placement(mut self, placement: TooltipPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Pointer entered segment `index`; returns whether a tooltip is shown
    pub fn pointer_enter(&mut self, index: usize, pointer: Anchor) -> bool {
        let Some(explanation) = self.segments.get(index).and_then(Segment::explanation) else {
            return false;
        };

        if self.active.is_some_and(|active| active != index) {
            self.handler.on_hover_end();
        }
        self.handler.on_hover_start(explanation, self.placement.place(pointer));
        self.active = Some(index);
        true
    }

    /// Pointer left segment `index`; returns whether a tooltip was hidden
    pub fn pointer_leave(&mut self, index: usize) -> bool {
        if self.active != Some(index) {
            return false;
        }
        self.active = None;
        self.handler.on_hover_end();
        true
    }

    /// Index of the segment whose tooltip is showing
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }
}

/// Output markup for a segment list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    /// Keywords wrapped in 【】
    #[default]
    Brackets,
    /// HTML spans carrying the explanation as a tooltip attribute
    Html,
    /// JSON array of tagged segments
    Json,
}

pub fn render(format: RenderFormat, segments: &[Segment<'_>]) -> Result<String> {
    match format {
        RenderFormat::Brackets => Ok(render_brackets(segments)),
        RenderFormat::Html => Ok(render_html(segments)),
        RenderFormat::Json => Ok(render_json(segments)?),
    }
}

pub fn render_brackets(segments: &[Segment<'_>]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Plain { text } => out.push_str(text),
            Segment::Keyword { text, .. } => {
                out.push('【');
                out.push_str(text);
                out.push('】');
            }
        }
    }
    out
}

pub fn render_html(segments: &[Segment<'_>]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Plain { text } => escape_html_into(text, &mut out),
            Segment::Keyword { text, explanation } => {
                out.push_str(r#"<span class="keyword" data-explanation=""#);
                escape_html_into(explanation, &mut out);
                out.push_str(r#"">"#);
                escape_html_into(text, &mut out);
                out.push_str("</span>");
            }
        }
    }
    out
}

pub fn render_json(segments: &[Segment<'_>]) -> serde_json::Result<String> {
    serde_json::to_string(segments)
}

fn escape_html_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
