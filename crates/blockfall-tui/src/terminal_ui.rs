use blockfall_engine::{
    BlockStyles, Dimensions, KeyReceiver, KeySender, Snapshot, Ui, UiError, input,
};
use ratatui::DefaultTerminal;

use crate::{
    input::InputThread,
    theme::{CellStyle, Theme},
    widgets::SessionDisplay,
};

/// A [`Ui`] drawing to the terminal in raw mode on the alternate screen.
///
/// The terminal is taken over in [`Ui::start`] and restored in [`Ui::stop`]
/// or when the value is dropped.
#[derive(Debug)]
pub struct TerminalUi {
    theme: Theme,
    dims: Option<Dimensions>,
    terminal: Option<DefaultTerminal>,
    sender: Option<KeySender>,
    receiver: Option<KeyReceiver>,
    input: Option<InputThread>,
}

impl TerminalUi {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self::with_key_buffer(theme, input::DEFAULT_KEY_BUFFER)
    }

    #[must_use]
    pub fn with_key_buffer(theme: Theme, capacity: usize) -> Self {
        let (sender, receiver) = input::channel(capacity);
        Self {
            theme,
            dims: None,
            terminal: None,
            sender: Some(sender),
            receiver: Some(receiver),
            input: None,
        }
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }
}

fn check_size(dims: Dimensions, (columns, rows): (u16, u16)) -> Result<(), UiError> {
    let (min_columns, min_rows) = SessionDisplay::min_size(dims);
    if columns < min_columns || rows < min_rows {
        return Err(UiError::TooSmall {
            height: dims.height(),
            width: dims.width(),
            columns,
            rows,
        });
    }
    Ok(())
}

impl Ui for TerminalUi {
    type Style = CellStyle;

    fn init(&mut self, dims: Dimensions) -> Result<(), UiError> {
        check_size(dims, crossterm::terminal::size()?)?;
        self.dims = Some(dims);
        Ok(())
    }

    fn block_styles(&self) -> BlockStyles<Self::Style> {
        self.theme.block_styles()
    }

    fn update(&mut self, snapshot: &Snapshot<'_, Self::Style>) -> Result<(), UiError> {
        let Some(terminal) = &mut self.terminal else {
            return Ok(());
        };
        let theme = self.theme;
        terminal.draw(|frame| {
            frame.render_widget(SessionDisplay::new(snapshot, theme), frame.area());
        })?;
        Ok(())
    }

    fn key_presses(&mut self) -> Result<KeyReceiver, UiError> {
        self.receiver.take().ok_or(UiError::InputTaken)
    }

    fn start(&mut self) -> Result<(), UiError> {
        if self.terminal.is_some() {
            return Ok(());
        }
        self.terminal = Some(ratatui::try_init()?);
        if let Some(sender) = self.sender.take() {
            self.input = Some(InputThread::spawn(sender));
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), UiError> {
        let input = self.input.take().map_or(Ok(()), |mut input| input.stop());
        self.sender = None;
        if self.terminal.take().is_some() {
            ratatui::try_restore()?;
        }
        Ok(input?)
    }
}

impl Drop for TerminalUi {
    fn drop(&mut self) {
        // errors cannot be reported from drop
        let _ = self.stop();
    }
}
