/// UI layer: immediate-mode panels and chart renderers over the data layer.
pub mod charts;
pub mod panels;
