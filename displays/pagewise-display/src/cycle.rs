//! Full refresh cycle over the band buffer
//!
//! Walks the bands top to bottom: clear the band, render the status screen
//! into it, hand it to the display. Stopping part way leaves the renderer
//! ready for the next cycle.

use pagewise_core::{MachineStatus, PageSequence};

use crate::backend::DisplayError;
use crate::band::BandBuffer;
use crate::eg::EgBackend;
use crate::screen::StatusScreen;

/// Run one refresh cycle, returning the number of bands flushed
///
/// `flush` receives each finished band; [`BandBuffer::window`] tells which
/// rows it holds. The first error from rendering or flushing ends the cycle.
pub fn refresh<S, F>(
    screen: &mut StatusScreen<'_>,
    band: &mut BandBuffer,
    blink: bool,
    status: &S,
    mut flush: F,
) -> Result<u16, DisplayError>
where
    S: MachineStatus + ?Sized,
    F: FnMut(&BandBuffer) -> Result<(), DisplayError>,
{
    let config = screen.config();
    let pages = PageSequence::new(config.height, config.page_rows);
    let mut flushed = 0;

    for page in pages {
        band.begin(&page)?;
        screen.render_page(page, blink, status, &mut EgBackend::new(band))?;
        if let Err(e) = flush(band) {
            #[cfg(feature = "defmt")]
            defmt::warn!("refresh: band {} flush failed: {}", page.index, e);
            return Err(e);
        }
        flushed += 1;
    }
    Ok(flushed)
}
