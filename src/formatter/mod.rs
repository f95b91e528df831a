//! 解答格式化
//!
//! `classify` 是唯一的分类实现，下游两个渲染器只消费它的输出：
//!
//! ```text
//! 解答文本 → classify → Vec<Block> ─┬→ display::render_blocks（屏幕）
//!                                   └→ html::render_document（Word 导出）
//! ```

pub mod blocks;
pub mod display;
pub mod html;

pub use blocks::{classify, Block, Span};
pub use display::{render_blocks, render_terminal};
pub use html::render_document;
