//! Binary-side test suite covering the renderers end to end.

mod widget_tests;
