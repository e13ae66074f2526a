//! Единый трэйт записи выписки поверх std::io::Write.
//! Рендереры читают агрегат и ничего в нём не пересчитывают.

use crate::{error::Result, model::Statement};
use std::io::Write;

pub trait WriteFormat {
    fn write<W: Write>(w: W, st: &Statement) -> Result<()>;
}
