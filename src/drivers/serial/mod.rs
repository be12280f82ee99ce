//! UART 16550 serial driver (COM1). Sole destination of kernel logging —
//! see `core::logging`.

use crate::arch::x86::ports::{inb, outb};
use crate::sync::Mutex;

const COM1_PORT: u16 = 0x3F8;

static SERIAL: Mutex<SerialPort> = Mutex::new(SerialPort::new(COM1_PORT));

struct SerialPort {
    port: u16,
    initialized: bool,
}

impl SerialPort {
    const fn new(port: u16) -> Self {
        Self { port, initialized: false }
    }

    fn init(&mut self) {
        if self.initialized {
            return;
        }
        unsafe {
            outb(self.port + 1, 0x00);
            outb(self.port + 3, 0x80);
            outb(self.port + 0, 0x03);
            outb(self.port + 1, 0x00);
            outb(self.port + 3, 0x03);
            outb(self.port + 2, 0xC7);
            outb(self.port + 4, 0x0B);
        }
        self.initialized = true;
    }

    fn is_transmit_empty(&self) -> bool {
        unsafe { (inb(self.port + 5) & 0x20) != 0 }
    }

    fn write_byte(&self, byte: u8) {
        while !self.is_transmit_empty() {
            core::hint::spin_loop();
        }
        unsafe {
            outb(self.port, byte);
        }
    }
}

/// Initializes the serial port. Idempotent.
pub fn init() {
    SERIAL.lock().init();
}

/// Emits a string with no trailing newline. Used by the `k*!` logging macros.
pub fn emit_str(s: &str) {
    let serial = SERIAL.lock();
    for byte in s.bytes() {
        serial.write_byte(byte);
    }
}

/// Emits a value as sixteen uppercase hex digits, no leading `0x`.
pub fn emit_hex(value: u64) {
    let serial = SERIAL.lock();
    for i in (0..16).rev() {
        let digit = ((value >> (i * 4)) & 0xF) as u8;
        let c = if digit < 10 { b'0' + digit } else { b'A' + digit - 10 };
        serial.write_byte(c);
    }
}

/// Emits a trailing newline.
pub fn emit_nl() {
    SERIAL.lock().write_byte(b'\n');
}
