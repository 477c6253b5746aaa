//! Status screen renderer
//!
//! Draws one band of the status screen per call. Every widget is gated by
//! the page predicate matching its vertical extent, so a widget is only ever
//! asked for the values it needs on the bands it touches. Text extents come
//! from [`Font::rows`], descenders included.
//!
//! Layout (128x64, 8-row status font):
//!
//! ```text
//!  0-18   header bitmap: nozzles, bed, fan
//!  0-9    target temperatures
//! 17-19   heating indicators
//! 20-30   current temperatures, fan percent
//! 29-40   X / Y / Z row
//! 41-52   SD icon, progress bar, elapsed time
//! 40-52   feed rate (and filament without SD)
//! 56-63   status line
//! ```

use core::fmt::Write;

use heapless::String;

use pagewise_core::axis::Axis;
use pagewise_core::config::{ConfigError, ProgressPolicy, StatusScreenConfig};
use pagewise_core::format::{self, fan_percent};
use pagewise_core::progress::{shows_percent, Elapsed, ProgressBar, RemainingEstimate};
use pagewise_core::scroll::{ScrollState, StatusLine};
use pagewise_core::status::{HeaterReading, MachineStatus};
use pagewise_core::utf8::cell_len;
use pagewise_core::{
    AxisValueFormatter, CachedAxisStrings, FanAnimation, Page, PageController,
    StatusMessageScroller,
};

use crate::backend::{DisplayError, DrawColor, Font, GraphicsBackend};

/// Width of one text cell (pixels)
pub const CHAR_WIDTH: i16 = 6;

/// Height of the status font above the baseline (rows)
pub const INFO_FONT_HEIGHT: u16 = 8;

const HOTEND_TEXT_X0: i16 = 6;
const HOTEND_TEXT_SPACING: i16 = 25;
const BED_TEXT_X: i16 = 81;
const HEAT_INDICATOR_X: i16 = 8;
const BED_INDICATOR_X: i16 = 7;

const TARGET_BASELINE: u16 = 7;
const CURRENT_BASELINE: u16 = 28;

const FAN_TEXT_X: i16 = 104;
const FAN_TEXT_Y: u16 = 27;

const PROGRESS_BAR_X: i16 = 54;
const PROGRESS_BAR_Y: u16 = 49;
const PROGRESS_NUMBER_X: i16 = 55;
const ESTIMATE_TIME_X: i16 = 96;
const ELAPSED_BASELINE: u16 = 48;
const ESTIMATE_BASELINE: u16 = 49;

const XYZ_BASELINE: u16 = 30 + INFO_FONT_HEIGHT;
const X_LABEL_POS: i16 = 3;
const X_VALUE_POS: i16 = 11;
const XYZ_SPACING: i16 = 40;

const FEEDRATE_BASELINE: u16 = 50;
const STATUS_BASELINE: u16 = 55 + INFO_FONT_HEIGHT;

/// Stand-ins for the LCD's custom glyphs, all present in ISO 8859-1
const DEGREE: &str = "°";
const FEEDRATE_GLYPH: &str = "F";
const FILAMENT_DIA_GLYPH: &str = "Ø";
const FILAMENT_MUL_GLYPH: &str = "×";

/// Short composed text (numbers plus units)
type Label = String<32>;

/// Header bitmap shown across the top of the screen
///
/// One frame per fan animation step; frame 0 is the still fan. Rows are
/// packed MSB first, `width.div_ceil(8)` bytes per row.
#[derive(Debug, Clone, Copy)]
pub struct HeaderArt<'a> {
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
    pub frames: &'a [&'a [u8]],
}

impl<'a> HeaderArt<'a> {
    /// Bytes in one packed row
    pub const fn bytes_per_row(&self) -> u16 {
        self.width.div_ceil(8)
    }

    /// Bitmap for `frame`, falling back to the still frame
    pub fn frame(&self, frame: u8) -> Option<&'a [u8]> {
        self.frames
            .get(frame as usize)
            .or_else(|| self.frames.first())
            .copied()
    }
}

/// Status screen renderer
///
/// Owns the state that outlives a single pass: scroll position, cached
/// coordinate strings, fan animation and the status line of the current
/// refresh cycle.
pub struct StatusScreen<'a> {
    config: StatusScreenConfig,
    header: Option<HeaderArt<'a>>,
    scroller: StatusMessageScroller,
    axes: AxisValueFormatter,
    cache: CachedAxisStrings,
    fan: FanAnimation,
    line: Option<StatusLine>,
}

impl<'a> StatusScreen<'a> {
    /// Create a renderer for a validated configuration
    pub fn new(config: StatusScreenConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            scroller: StatusMessageScroller::new(config.message_scrolling),
            axes: AxisValueFormatter::new(config.reduced_accuracy_warning),
            cache: CachedAxisStrings::new(),
            fan: FanAnimation::new(config.fan_frames),
            header: None,
            line: None,
            config,
        })
    }

    /// Draw `header` across the top of the screen
    pub fn with_header(mut self, header: HeaderArt<'a>) -> Self {
        self.header = Some(header);
        self
    }

    pub fn config(&self) -> &StatusScreenConfig {
        &self.config
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroller.state()
    }

    pub fn cached_axes(&self) -> &CachedAxisStrings {
        &self.cache
    }

    /// Render one band
    ///
    /// `blink` is sampled once by the caller and shared by every band of the
    /// cycle. The first band refreshes the cached coordinate strings.
    pub fn render_page<S, G>(
        &mut self,
        page: Page,
        blink: bool,
        status: &S,
        gfx: &mut G,
    ) -> Result<(), DisplayError>
    where
        S: MachineStatus + ?Sized,
        G: GraphicsBackend + ?Sized,
    {
        let pc = PageController::new(page);

        if pc.is_first() {
            self.cache.refresh(status, self.config.filament_display);
            self.line = None;
            #[cfg(feature = "defmt")]
            defmt::trace!("status screen: axis strings refreshed");
        }
        if self.config.fan {
            self.fan.update(blink, status.fan_speed());
        }

        gfx.set_font(Font::Status);
        gfx.set_color(DrawColor::Set);

        self.draw_header(&pc, blink, status, gfx)?;
        self.draw_temperatures(&pc, blink, status, gfx)?;
        self.draw_sd_icon(&pc, status, gfx)?;
        if self.config.shows_progress() {
            match self.config.progress {
                ProgressPolicy::ElapsedBar => self.draw_progress_bar(&pc, status, gfx)?,
                ProgressPolicy::RemainingEstimate => self.draw_progress_text(&pc, status, gfx)?,
            }
        }
        self.draw_coordinates(&pc, blink, status, gfx)?;
        self.draw_feedrate(&pc, status, gfx)?;
        self.draw_status_line(&pc, blink, status, gfx)
    }

    fn draw_header<S, G>(
        &self,
        pc: &PageController,
        blink: bool,
        status: &S,
        gfx: &mut G,
    ) -> Result<(), DisplayError>
    where
        S: MachineStatus + ?Sized,
        G: GraphicsBackend + ?Sized,
    {
        let Some(header) = self.header else {
            return Ok(());
        };
        let bottom = header.y as i32 + header.height as i32 - 1;
        if header.height == 0 || bottom < 0 {
            return Ok(());
        }
        let top = header.y.max(0) as u16;
        if !pc.overlaps(top, bottom.min(u16::MAX as i32) as u16) {
            return Ok(());
        }
        let frame = if self.config.fan {
            self.fan.frame(blink, status.fan_speed())
        } else {
            0
        };
        match header.frame(frame) {
            Some(bitmap) => gfx.draw_bitmap(
                header.x,
                header.y,
                header.bytes_per_row(),
                header.height,
                bitmap,
            ),
            None => Ok(()),
        }
    }

    fn draw_temperatures<S, G>(
        &self,
        pc: &PageController,
        blink: bool,
        status: &S,
        gfx: &mut G,
    ) -> Result<(), DisplayError>
    where
        S: MachineStatus + ?Sized,
        G: GraphicsBackend + ?Sized,
    {
        let (_, current_bottom) = Font::Status.rows(CURRENT_BASELINE);
        if !pc.is_above(current_bottom) {
            return Ok(());
        }

        for e in 0..self.config.hotends {
            let x = HOTEND_TEXT_X0 + e as i16 * HOTEND_TEXT_SPACING;
            self.draw_heater(pc, x, status.hotend(e), false, blink, gfx)?;
        }
        if self.config.shows_bed() {
            self.draw_heater(pc, BED_TEXT_X, status.bed(), true, blink, gfx)?;
        }

        if self.config.fan && text_in_band(pc, Font::Status, FAN_TEXT_Y) {
            let percent = fan_percent(status.fan_speed());
            if percent != 0 {
                let mut text = Label::new();
                let _ = write!(text, "{}%", format::int3(percent as i32));
                gfx.draw_text(FAN_TEXT_X, FAN_TEXT_Y as i16, &text)?;
            }
        }
        Ok(())
    }

    fn draw_heater<G>(
        &self,
        pc: &PageController,
        x: i16,
        heater: HeaterReading,
        is_bed: bool,
        blink: bool,
        gfx: &mut G,
    ) -> Result<(), DisplayError>
    where
        G: GraphicsBackend + ?Sized,
    {
        if text_in_band(pc, Font::Status, TARGET_BASELINE) {
            let hidden = self.config.heater_idle_blink && heater.idle && !blink;
            if !hidden {
                draw_centered_temp(gfx, heater.target_c, x, TARGET_BASELINE)?;
            }
        }

        if text_in_band(pc, Font::Status, CURRENT_BASELINE) {
            draw_centered_temp(gfx, heater.current_c, x, CURRENT_BASELINE)?;
        }

        let (dx, y) = if is_bed {
            (BED_INDICATOR_X, 18)
        } else {
            (HEAT_INDICATOR_X, 17)
        };
        if pc.overlaps(y, y + 1) {
            if heater.heating {
                gfx.set_color(DrawColor::Clear);
                gfx.draw_box(x + dx, y as i16, 2, 2)?;
                gfx.set_color(DrawColor::Set);
            } else {
                gfx.draw_box(x + dx, y as i16, 2, 2)?;
            }
        }
        Ok(())
    }

    fn draw_sd_icon<S, G>(
        &self,
        pc: &PageController,
        status: &S,
        gfx: &mut G,
    ) -> Result<(), DisplayError>
    where
        S: MachineStatus + ?Sized,
        G: GraphicsBackend + ?Sized,
    {
        if !self.config.sd_support || !pc.overlaps(42, 52) || !status.sd_file_open() {
            return Ok(());
        }
        gfx.draw_box(42, 42, 8, 7)?;
        gfx.draw_box(50, 44, 2, 5)?;
        gfx.draw_frame(42, 49, 10, 4)?;
        gfx.draw_pixel(50, 43)
    }

    fn progress<S: MachineStatus + ?Sized>(&self, status: &S) -> Option<u8> {
        self.config
            .progress_percent(status.manual_progress(), status.sd_progress())
    }

    fn draw_progress_bar<S, G>(
        &self,
        pc: &PageController,
        status: &S,
        gfx: &mut G,
    ) -> Result<(), DisplayError>
    where
        S: MachineStatus + ?Sized,
        G: GraphicsBackend + ?Sized,
    {
        let bar = ProgressBar::new(self.config.width - PROGRESS_BAR_X as u16);

        if pc.overlaps(PROGRESS_BAR_Y, PROGRESS_BAR_Y + 3) {
            gfx.draw_frame(PROGRESS_BAR_X, PROGRESS_BAR_Y as i16, bar.width(), 4)?;
        }

        let percent = self.progress(status).unwrap_or(0);
        if shows_percent(percent) {
            let fill = bar.fill_width(percent);
            if fill > 0 && pc.overlaps(PROGRESS_BAR_Y + 1, PROGRESS_BAR_Y + 2) {
                gfx.draw_box(PROGRESS_BAR_X + 1, PROGRESS_BAR_Y as i16 + 1, fill, 2)?;
            }
            if self.config.sd_percent && text_in_band(pc, Font::Status, ELAPSED_BASELINE) {
                let mut text = Label::new();
                let _ = write!(text, "{}%", format::int3(percent as i32));
                gfx.draw_text(PROGRESS_NUMBER_X, ELAPSED_BASELINE as i16, &text)?;
            }
        }

        if text_in_band(pc, Font::Status, ELAPSED_BASELINE) {
            let elapsed = Elapsed(status.elapsed_seconds()).to_digital();
            let len = cell_len(elapsed.as_bytes()) as i16;
            let x = if self.config.sd_percent {
                self.config.width as i16 - len * CHAR_WIDTH
            } else {
                PROGRESS_BAR_X + bar.width() as i16 / 2 - len * (CHAR_WIDTH / 2)
            };
            gfx.draw_text(x, ELAPSED_BASELINE as i16, &elapsed)?;
        }
        Ok(())
    }

    fn draw_progress_text<S, G>(
        &self,
        pc: &PageController,
        status: &S,
        gfx: &mut G,
    ) -> Result<(), DisplayError>
    where
        S: MachineStatus + ?Sized,
        G: GraphicsBackend + ?Sized,
    {
        if !text_in_band(pc, Font::Status, ESTIMATE_BASELINE) {
            return Ok(());
        }
        if let Some(percent) = self.progress(status).filter(|&p| shows_percent(p)) {
            let mut text = Label::new();
            let _ = write!(text, "{}%", format::int3(percent as i32));
            gfx.draw_text(PROGRESS_NUMBER_X, ESTIMATE_BASELINE as i16, &text)?;
        }
        let elapsed = Elapsed(status.elapsed_seconds()).to_digital();
        gfx.draw_text(ESTIMATE_TIME_X, ESTIMATE_BASELINE as i16, &elapsed)
    }

    fn draw_coordinates<S, G>(
        &self,
        pc: &PageController,
        blink: bool,
        status: &S,
        gfx: &mut G,
    ) -> Result<(), DisplayError>
    where
        S: MachineStatus + ?Sized,
        G: GraphicsBackend + ?Sized,
    {
        let hollow = self.config.xyz_hollow_frame;
        let (top, height) = if hollow {
            (29, INFO_FONT_HEIGHT + 3)
        } else {
            (30, INFO_FONT_HEIGHT + 1)
        };
        if pc.overlaps(top, top + height - 1) {
            if hollow {
                gfx.draw_frame(0, top as i16, self.config.width, height)?;
            } else {
                gfx.draw_box(0, top as i16, self.config.width, height)?;
            }
        }

        if !text_in_band(pc, Font::Status, XYZ_BASELINE) {
            return Ok(());
        }
        if !hollow {
            gfx.set_color(DrawColor::Clear);
        }

        let estimate = match self.config.progress {
            ProgressPolicy::RemainingEstimate if status.is_running() => {
                RemainingEstimate::select(status.minutes_to_change(), status.remaining_minutes())
            }
            _ => None,
        };
        match estimate {
            Some(estimate) => {
                let text = estimate.format(status.feedrate_percent());
                gfx.draw_text(X_LABEL_POS, XYZ_BASELINE as i16, &text)?;
            }
            None => {
                self.draw_axis(Axis::X, 0, blink, status, gfx)?;
                self.draw_axis(Axis::Y, 1, blink, status, gfx)?;
            }
        }
        self.draw_axis(Axis::Z, 2, blink, status, gfx)?;

        if !hollow {
            gfx.set_color(DrawColor::Set);
        }
        Ok(())
    }

    fn draw_axis<S, G>(
        &self,
        axis: Axis,
        slot: i16,
        blink: bool,
        status: &S,
        gfx: &mut G,
    ) -> Result<(), DisplayError>
    where
        S: MachineStatus + ?Sized,
        G: GraphicsBackend + ?Sized,
    {
        let x = slot * XYZ_SPACING;
        let y = XYZ_BASELINE as i16;
        gfx.draw_text(x + X_LABEL_POS, y, axis.label())?;
        let value = self
            .axes
            .format(self.cache.axis(axis), status.axis_homing(axis), blink);
        gfx.draw_text(x + X_VALUE_POS, y, &value)
    }

    fn draw_feedrate<S, G>(
        &self,
        pc: &PageController,
        status: &S,
        gfx: &mut G,
    ) -> Result<(), DisplayError>
    where
        S: MachineStatus + ?Sized,
        G: GraphicsBackend + ?Sized,
    {
        // the menu glyphs reach higher than the status digits
        if !text_in_band(pc, Font::Menu, FEEDRATE_BASELINE) {
            return Ok(());
        }
        let y = FEEDRATE_BASELINE as i16;

        gfx.set_font(Font::Menu);
        gfx.draw_text(3, y, FEEDRATE_GLYPH)?;
        gfx.set_font(Font::Status);

        let mut text = Label::new();
        let _ = write!(
            text,
            "{}%",
            format::int3(status.feedrate_percent() as i32)
        );
        gfx.draw_text(12, y, &text)?;

        if self.config.filament_on_feedrate_row() {
            gfx.draw_text(56, y, self.cache.filament_width())?;
            let mut ratio = Label::new();
            let _ = write!(ratio, "{}%", self.cache.filament_ratio());
            gfx.draw_text(102, y, &ratio)?;

            gfx.set_font(Font::Menu);
            gfx.draw_text(47, y, FILAMENT_DIA_GLYPH)?;
            gfx.draw_text(93, y, FILAMENT_MUL_GLYPH)?;
            gfx.set_font(Font::Status);
        }
        Ok(())
    }

    fn draw_status_line<S, G>(
        &mut self,
        pc: &PageController,
        blink: bool,
        status: &S,
        gfx: &mut G,
    ) -> Result<(), DisplayError>
    where
        S: MachineStatus + ?Sized,
        G: GraphicsBackend + ?Sized,
    {
        if !text_in_band(pc, Font::Status, STATUS_BASELINE) {
            return Ok(());
        }
        let y = STATUS_BASELINE as i16;

        if self.config.filament_on_status_row()
            && status.status_message_age_ms() >= self.config.filament_message_ms
        {
            let mut text = Label::new();
            let _ = write!(
                text,
                "{}:{}  {}:{}%",
                FILAMENT_DIA_GLYPH,
                self.cache.filament_width(),
                FILAMENT_MUL_GLYPH,
                self.cache.filament_ratio()
            );
            return gfx.draw_text(0, y, &text);
        }

        // One line per cycle, so bands sharing the status row never tear
        let line = match self.line.take() {
            Some(line) => line,
            None => self.scroller.render(
                status.status_message(),
                self.config.status_width as usize,
                blink,
            ),
        };
        let result = gfx.draw_text(0, y, &line);
        self.line = Some(line);
        result
    }
}

/// Whether a line of `font` text on `baseline` reaches into the band
fn text_in_band(pc: &PageController, font: Font, baseline: u16) -> bool {
    let (top, bottom) = font.rows(baseline);
    pc.overlaps(top, bottom)
}

/// Draw a 3-digit temperature centered on `x`, followed by a degree sign
fn draw_centered_temp<G>(gfx: &mut G, temp_c: f32, x: i16, y: u16) -> Result<(), DisplayError>
where
    G: GraphicsBackend + ?Sized,
{
    let digits = format::int3(format::round_to_i32(temp_c));
    let leading = digits.bytes().take(2).take_while(|&b| b == b' ').count() as i16;
    let mut text = Label::new();
    let _ = write!(text, "{}{} ", digits, DEGREE);
    gfx.draw_text(x - leading * CHAR_WIDTH / 2, y as i16, &text)
}
