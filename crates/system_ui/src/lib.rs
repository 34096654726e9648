//! Leptos design-system primitives and the interactive data grid.
//!
//! The crate owns reusable primitives, a centralized icon API, the stable `data-ui-*` DOM
//! contract consumed by the theme CSS, and the [`DataGrid`] component family that renders the
//! headless engine from `data_grid_core`. Pages compose these components instead of emitting ad
//! hoc control markup.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod data_grid;
mod icon;
mod primitives;

pub use data_grid::{DataGrid, DataGridContext};
pub use icon::{Icon, IconName, IconSize};
pub use primitives::{
    Badge, Button, ButtonSize, ButtonVariant, CheckboxField, Cluster, DataTable, Elevation,
    EmptyState, FieldVariant, Heading, IconButton, LayoutAlign, LayoutGap, LayoutJustify,
    LayoutPadding, MenuItem, MenuSeparator, MenuSurface, ProgressBar, SelectField, Stack, Surface,
    SurfaceVariant, Text, TextField, TextRole, TextTone, ToolBar,
};

/// Convenience imports for page crates consuming the primitive set and the grid.
pub mod prelude {
    pub use crate::{
        Badge, Button, ButtonSize, ButtonVariant, CheckboxField, Cluster, DataGrid, DataTable,
        Elevation, EmptyState, FieldVariant, Heading, Icon, IconButton, IconName, IconSize,
        LayoutAlign, LayoutGap, LayoutJustify, LayoutPadding, MenuItem, MenuSeparator,
        MenuSurface, ProgressBar, SelectField, Stack, Surface, SurfaceVariant, Text, TextField,
        TextRole, TextTone, ToolBar,
    };
}
