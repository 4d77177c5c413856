use std::io::{self, stdout, Write};
use std::sync::Mutex;

// Where PRN sends its values. A failed write ends the run.
pub trait Printer: Send + Sync {
    fn print(&self, val: u8) -> io::Result<()>;
}

#[derive(Default, Clone, Copy)]
pub struct StdoutPrinter();

impl Printer for StdoutPrinter {
    fn print(&self, val: u8) -> io::Result<()> {
        let mut out = stdout().lock();
        writeln!(out, "{val}")?;
        out.flush()
    }
}


#[derive(Default)]
pub struct PipePrinter {
    buf: Mutex<Vec<u8>>,
}

impl Printer for PipePrinter {
    fn print(&self, val: u8) -> io::Result<()> {
        self.lock().push(val);
        Ok(())
    }
}

impl PipePrinter {
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<u8>> {
        self.buf.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn take(&self) -> Vec<u8> {
        let mut buf = self.lock();
        std::mem::take(&mut *buf)
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // What stdout would have shown.
    pub fn take_output(&self) -> String {
        self.take().iter().map(|val| format!("{val}\n")).collect()
    }
}
