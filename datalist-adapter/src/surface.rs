use datalist::{ColumnRegistry, HeaderCell, RenderFragment, RenderInstruction, SortSpec, ViewSurface};

/// A framework-neutral table surface: applies render instructions to rows of rendered cells.
///
/// Adapters for a concrete UI (terminal, DOM, immediate-mode GUI) can wrap this, or use it as a
/// reference for their own [`ViewSurface`].
#[derive(Clone, Debug)]
pub struct TableModel {
    registry: ColumnRegistry,
    lines: Vec<Vec<RenderFragment>>,
    loading: bool,
    exhausted: bool,
    replaced: usize,
}

impl TableModel {
    pub fn new(registry: ColumnRegistry) -> Self {
        Self {
            registry,
            lines: Vec::new(),
            loading: false,
            exhausted: false,
            replaced: 0,
        }
    }

    pub fn lines(&self) -> &[Vec<RenderFragment>] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// How many full re-renders this surface has performed.
    pub fn replace_count(&self) -> usize {
        self.replaced
    }

    /// Whether to show the "nothing matches" placeholder instead of rows.
    pub fn shows_placeholder(&self) -> bool {
        self.lines.is_empty() && self.exhausted && !self.loading
    }

    pub fn header(&self, sort: Option<&SortSpec>) -> Vec<HeaderCell> {
        self.registry.header_cells(sort)
    }

    /// Plain-text rendering: a title line, then one ` | `-separated line per row.
    pub fn to_text(&self, sort: Option<&SortSpec>) -> String {
        let mut out = String::new();
        let titles: Vec<String> = self
            .header(sort)
            .into_iter()
            .map(|cell| match cell.order {
                Some(order) => format!("{} ({order})", cell.title),
                None => cell.title,
            })
            .collect();
        out.push_str(&titles.join(" | "));
        for line in &self.lines {
            out.push('\n');
            let cells: Vec<&str> = line.iter().map(RenderFragment::as_str).collect();
            out.push_str(&cells.join(" | "));
        }
        out
    }
}

impl ViewSurface for TableModel {
    fn render(&mut self, instruction: RenderInstruction) {
        match instruction {
            RenderInstruction::ReplaceAll(rows) => {
                self.replaced += 1;
                self.lines = rows.iter().map(|row| self.registry.render_row(row)).collect();
            }
            RenderInstruction::Append(rows) => {
                self.lines
                    .extend(rows.iter().map(|row| self.registry.render_row(row)));
            }
            RenderInstruction::SetLoading(loading) => self.loading = loading,
            RenderInstruction::SetExhausted(exhausted) => self.exhausted = exhausted,
        }
    }
}
