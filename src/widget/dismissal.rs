//! Close the dropdown when the user clicks somewhere else.
//!
//! The detector only listens while it is attached. The widget attaches it
//! when the dropdown opens and detaches it when the dropdown closes or the
//! widget is torn down, so a closed dropdown does no pointer handling at all.

/// A screen cell position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// A screen region, half-open on the right and bottom edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        let x = u32::from(point.x);
        let y = u32::from(point.y);
        x >= u32::from(self.x)
            && x < u32::from(self.x) + u32::from(self.width)
            && y >= u32::from(self.y)
            && y < u32::from(self.y) + u32::from(self.height)
    }
}

/// Outside-click detector for the input + dropdown pair
#[derive(Debug, Clone, Default)]
pub struct DismissalDetector {
    input: Option<Rect>,
    dropdown: Option<Rect>,
    attached: bool,
}

impl DismissalDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where the input and dropdown are currently drawn
    pub fn set_regions(&mut self, input: Rect, dropdown: Rect) {
        self.input = Some(input);
        self.dropdown = Some(dropdown);
    }

    pub fn attach(&mut self) {
        if !self.attached {
            tracing::trace!("Dismissal listener attached");
            self.attached = true;
        }
    }

    pub fn detach(&mut self) {
        if self.attached {
            tracing::trace!("Dismissal listener detached");
            self.attached = false;
        }
    }

    /// Attach while the dropdown is open, detach otherwise
    pub fn sync(&mut self, open: bool) {
        if open {
            self.attach();
        } else {
            self.detach();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Handle a pointer-down event; returns true when the dropdown should close
    pub fn on_pointer_down(&self, point: Point) -> bool {
        if !self.attached {
            return false;
        }

        let inside = |region: Option<Rect>| region.is_some_and(|r| r.contains(point));
        !inside(self.input) && !inside(self.dropdown)
    }
}
