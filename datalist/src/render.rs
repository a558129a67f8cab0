use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Row;

/// A single update for the view layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderInstruction {
    /// Discard every displayed row and show these instead.
    ReplaceAll(Vec<Row>),
    /// Add these rows after the displayed ones.
    Append(Vec<Row>),
    SetLoading(bool),
    SetExhausted(bool),
}

/// Receives render instructions. The surface owns all markup and layout decisions and never
/// mutates list state; user input flows back through the controller's operations.
pub trait ViewSurface {
    fn render(&mut self, instruction: RenderInstruction);
}

/// A recording surface, mostly useful in tests and headless hosts.
impl ViewSurface for Vec<RenderInstruction> {
    fn render(&mut self, instruction: RenderInstruction) {
        self.push(instruction);
    }
}

impl<V: ViewSurface + ?Sized> ViewSurface for &mut V {
    fn render(&mut self, instruction: RenderInstruction) {
        (**self).render(instruction);
    }
}

impl<V: ViewSurface + ?Sized> ViewSurface for Box<V> {
    fn render(&mut self, instruction: RenderInstruction) {
        (**self).render(instruction);
    }
}

/// Forwards instructions to a surface while tracking what it currently shows.
///
/// It enforces the instruction contract:
/// - `SetLoading`/`SetExhausted` are only sent when the flag actually changes.
/// - An empty `Append` is dropped.
#[derive(Clone, Debug)]
pub(crate) struct RenderEmitter<V> {
    surface: V,
    loading: bool,
    exhausted: bool,
    displayed: usize,
}

impl<V> RenderEmitter<V> {
    pub(crate) fn new(surface: V) -> Self {
        Self {
            surface,
            loading: false,
            exhausted: false,
            displayed: 0,
        }
    }

    pub(crate) fn surface(&self) -> &V {
        &self.surface
    }

    pub(crate) fn surface_mut(&mut self) -> &mut V {
        &mut self.surface
    }

    pub(crate) fn into_surface(self) -> V {
        self.surface
    }

    /// Number of rows the surface currently shows.
    pub(crate) fn displayed(&self) -> usize {
        self.displayed
    }
}

impl<V: ViewSurface> RenderEmitter<V> {
    pub(crate) fn replace_all(&mut self, rows: &[Row]) {
        self.displayed = rows.len();
        self.surface
            .render(RenderInstruction::ReplaceAll(rows.to_vec()));
    }

    pub(crate) fn append(&mut self, rows: Vec<Row>) {
        if rows.is_empty() {
            return;
        }
        self.displayed = self.displayed.saturating_add(rows.len());
        self.surface.render(RenderInstruction::Append(rows));
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        if self.loading == loading {
            return;
        }
        self.loading = loading;
        self.surface.render(RenderInstruction::SetLoading(loading));
    }

    pub(crate) fn set_exhausted(&mut self, exhausted: bool) {
        if self.exhausted == exhausted {
            return;
        }
        self.exhausted = exhausted;
        self.surface
            .render(RenderInstruction::SetExhausted(exhausted));
    }
}
