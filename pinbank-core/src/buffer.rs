//! Port bit buffer
//!
//! The cached output state of one 8-line expander port. The buffer is an
//! ordered run of 8 binary digits; encoding reads the digits front to back
//! as a base-2 number, so the first digit is the most significant bit.
//!
//! Pins are placed from the back: the k-th pin registered on a port sits at
//! index `-(k + 1)`. The first registered pin therefore drives bit 0 of the
//! latch byte and the eighth drives bit 7, matching GPA0..GPA7 / GPB0..GPB7
//! on the MCP23017.

/// Number of output lines per port
pub const PORT_WIDTH: usize = 8;

/// Position inside a [`BitBuffer`], counted from the back (-1 is the last digit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitIndex(i8);

impl BitIndex {
    /// Create an index, `None` unless `-8 <= index <= -1`
    pub const fn new(index: i8) -> Option<Self> {
        if index >= -(PORT_WIDTH as i8) && index <= -1 {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Index for the `order`-th pin registered on a port (0-based)
    ///
    /// Returns `-(order + 1)`, or `None` past the port width.
    pub const fn for_registration_order(order: u8) -> Option<Self> {
        if (order as usize) < PORT_WIDTH {
            Some(Self(-(order as i8) - 1))
        } else {
            None
        }
    }

    /// Raw negative index
    pub const fn get(self) -> i8 {
        self.0
    }

    /// Offset from the front of the buffer
    const fn position(self) -> usize {
        (PORT_WIDTH as i8 + self.0) as usize
    }

    /// Bit this index occupies in the encoded byte
    pub const fn bit(self) -> u8 {
        1 << (-self.0 - 1)
    }
}

/// Cached output state of one port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitBuffer {
    digits: [bool; PORT_WIDTH],
}

impl BitBuffer {
    /// All-off buffer
    pub const fn new() -> Self {
        Self {
            digits: [false; PORT_WIDTH],
        }
    }

    /// Buffer whose encoding is `value`
    pub fn from_byte(value: u8) -> Self {
        let mut buffer = Self::new();
        for (position, digit) in buffer.digits.iter_mut().enumerate() {
            *digit = value & (0x80 >> position) != 0;
        }
        buffer
    }

    /// Overwrite one digit
    pub fn set(&mut self, index: BitIndex, on: bool) {
        self.digits[index.position()] = on;
    }

    /// Read one digit
    pub fn get(&self, index: BitIndex) -> bool {
        self.digits[index.position()]
    }

    /// Invert one digit, returning the new value
    pub fn toggle(&mut self, index: BitIndex) -> bool {
        let on = !self.get(index);
        self.set(index, on);
        on
    }

    /// Set every digit to 0
    pub fn clear(&mut self) {
        self.digits = [false; PORT_WIDTH];
    }

    /// Set every digit to 1
    pub fn fill(&mut self) {
        self.digits = [true; PORT_WIDTH];
    }

    /// Digits in buffer order
    pub fn digits(&self) -> &[bool; PORT_WIDTH] {
        &self.digits
    }

    /// Concatenate the digits and read them as a base-2 number
    pub fn encode(&self) -> u8 {
        self.digits
            .iter()
            .fold(0u8, |acc, &digit| (acc << 1) | u8::from(digit))
    }
}
