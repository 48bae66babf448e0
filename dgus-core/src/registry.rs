//! Display variable registry
//!
//! Every VP the firmware knows about is described once in a static table:
//! its wire size, the firmware value it mirrors, the handler that applies a
//! touch event, and the formatter that renders the value for the panel.
//! Entries may be missing any of the three bindings. A VP with address `0`
//! ends the table early.

use core::fmt;

use dgus_protocol::MAX_DATA_SIZE;

use crate::ui::Ui;

/// Applies data reported by the panel. Receives the raw payload after the
/// VP address and word count.
pub type RxHandler<M> = fn(&mut Ui<'_, M>, &VpVar<M>, &[u8]);

/// Renders the current value of a VP to the panel.
pub type TxHandler<M> = fn(&mut Ui<'_, M>, &VpVar<M>);

/// Firmware value bound to a VP
///
/// Numeric bindings are accessor functions into the firmware model so the
/// table itself can live in flash.
pub enum Var<M> {
    U8(fn(&mut M) -> &mut u8),
    U16(fn(&mut M) -> &mut u16),
    I16(fn(&mut M) -> &mut i16),
    F32(fn(&mut M) -> &mut f32),
    /// Text owned by the model
    Text(fn(&M) -> &str),
    /// Fixed text
    Static(&'static str),
}

impl<M> Clone for Var<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Var<M> {}

impl<M> fmt::Debug for Var<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Var::U8(_) => "U8",
            Var::U16(_) => "U16",
            Var::I16(_) => "I16",
            Var::F32(_) => "F32",
            Var::Text(_) => "Text",
            Var::Static(_) => "Static",
        };
        f.write_str(kind)
    }
}

impl<M> Var<M> {
    /// Value as a 16-bit word, `None` for non-integer bindings
    pub fn read_word(&self, model: &mut M) -> Option<u16> {
        match *self {
            Var::U8(get) => Some(u16::from(*get(model))),
            Var::U16(get) => Some(*get(model)),
            Var::I16(get) => Some(*get(model) as u16),
            _ => None,
        }
    }

    /// Store a word, truncating to the bound width. Returns `false` for
    /// non-integer bindings.
    pub fn write_word(&self, model: &mut M, value: u16) -> bool {
        match *self {
            Var::U8(get) => *get(model) = value as u8,
            Var::U16(get) => *get(model) = value,
            Var::I16(get) => *get(model) = value as i16,
            _ => return false,
        }
        true
    }

    pub fn read_f32(&self, model: &mut M) -> Option<f32> {
        match *self {
            Var::U8(get) => Some(f32::from(*get(model))),
            Var::U16(get) => Some(f32::from(*get(model))),
            Var::I16(get) => Some(f32::from(*get(model))),
            Var::F32(get) => Some(*get(model)),
            _ => None,
        }
    }

    pub fn write_f32(&self, model: &mut M, value: f32) -> bool {
        match *self {
            Var::F32(get) => *get(model) = value,
            _ => return false,
        }
        true
    }

    /// Text of a string binding
    pub fn text<'m>(&self, model: &'m M) -> Option<&'m str> {
        match *self {
            Var::Text(get) => Some(get(model)),
            Var::Static(text) => Some(text),
            _ => None,
        }
    }
}

/// One registry entry
pub struct VpVar<M: 'static> {
    /// VP address; `0` terminates the table
    pub vp: u16,
    /// Bytes the VP occupies on the wire
    pub size: u8,
    pub var: Option<Var<M>>,
    pub rx: Option<RxHandler<M>>,
    pub tx: Option<TxHandler<M>>,
}

impl<M: 'static> Clone for VpVar<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: 'static> Copy for VpVar<M> {}

impl<M: 'static> fmt::Debug for VpVar<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VpVar")
            .field("vp", &self.vp)
            .field("size", &self.size)
            .field("var", &self.var)
            .field("rx", &self.rx.is_some())
            .field("tx", &self.tx.is_some())
            .finish()
    }
}

impl<M: 'static> VpVar<M> {
    pub const fn new(
        vp: u16,
        size: u8,
        var: Option<Var<M>>,
        rx: Option<RxHandler<M>>,
        tx: Option<TxHandler<M>>,
    ) -> Self {
        Self {
            vp,
            size,
            var,
            rx,
            tx,
        }
    }

    /// Table terminator
    pub const fn end() -> Self {
        Self::new(0, 0, None, None, None)
    }

    pub fn is_terminator(&self) -> bool {
        self.vp == 0
    }

    /// Shortest payload an inbound handler may be given. The panel always
    /// reports whole words.
    pub fn min_rx_len(&self) -> usize {
        usize::from(self.size).max(2)
    }

    /// Whether the wire size can carry the bound value. Numbers travel as
    /// one byte, a word or a double word; text may take any size.
    pub fn has_valid_width(&self) -> bool {
        match self.var {
            Some(Var::Text(_)) | Some(Var::Static(_)) | None => true,
            Some(_) => matches!(self.size, 1 | 2 | 4),
        }
    }
}

/// Error found by [`Registry::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// Two live entries share an address
    DuplicateAddress(u16),
    /// Entry with a zero wire size
    ZeroSize(u16),
    /// Entry that would not fit into one frame
    Oversized(u16),
    /// Numeric binding whose size is not 1, 2 or 4 bytes
    BadWidth(u16),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateAddress(vp) => write!(f, "VP {vp:#06x} registered twice"),
            Self::ZeroSize(vp) => write!(f, "VP {vp:#06x} has zero size"),
            Self::Oversized(vp) => write!(f, "VP {vp:#06x} exceeds the frame capacity"),
            Self::BadWidth(vp) => write!(f, "VP {vp:#06x} has no numeric encoding of its size"),
        }
    }
}

/// Result of routing an inbound report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// The handler ran
    Handled,
    /// The VP is registered but accepts no input
    ReadOnly,
    /// No entry for the VP
    Unknown,
    /// Fewer bytes than the entry needs; handler not called
    TooShort,
}

/// Read-only view of the static VP table
pub struct Registry<M: 'static> {
    vars: &'static [VpVar<M>],
}

impl<M: 'static> Clone for Registry<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: 'static> Copy for Registry<M> {}

impl<M: 'static> Registry<M> {
    pub const fn new(vars: &'static [VpVar<M>]) -> Self {
        Self { vars }
    }

    /// Live entries, up to the terminator
    pub fn iter(&self) -> impl Iterator<Item = &'static VpVar<M>> {
        self.vars.iter().take_while(|var| !var.is_terminator())
    }

    /// Entry for `vp`. Address `0` is never found.
    pub fn lookup(&self, vp: u16) -> Option<&'static VpVar<M>> {
        if vp == 0 {
            return None;
        }
        self.iter().find(|var| var.vp == vp)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check the table for entries that could never work
    pub fn validate(&self) -> Result<(), RegistryError> {
        for (index, var) in self.iter().enumerate() {
            if var.size == 0 {
                return Err(RegistryError::ZeroSize(var.vp));
            }
            if usize::from(var.size) > MAX_DATA_SIZE {
                return Err(RegistryError::Oversized(var.vp));
            }
            if !var.has_valid_width() {
                return Err(RegistryError::BadWidth(var.vp));
            }
            if self.iter().skip(index + 1).any(|other| other.vp == var.vp) {
                return Err(RegistryError::DuplicateAddress(var.vp));
            }
        }
        Ok(())
    }
}
