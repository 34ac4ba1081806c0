//! In-memory STMPE811 model for driver tests
//!
//! Implements the blocking I2C trait over a 256-byte register file plus a
//! sample FIFO. Every completed transaction is recorded; failures can be
//! injected at a given transaction index.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

use super::stmpe811::{bits, reg};

/// Recorded bus transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    /// Bytes written
    Write(Vec<u8>),
    /// Bytes read starting at the selected register
    Read { register: u8, len: usize },
}

/// Injected transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeBusError;

impl embedded_hal::i2c::Error for FakeBusError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
    }
}

/// Raw sample as the chip would queue it
#[derive(Debug, Clone, Copy)]
struct RawSample {
    x: u16,
    y: u16,
    z: u16,
}

pub struct FakeStmpe811 {
    registers: [u8; 256],
    pointer: u8,
    fifo: VecDeque<RawSample>,
    /// Samples that arrive once `pops` reaches the given count
    late: Vec<(usize, RawSample)>,
    pops: usize,
    log: Rc<RefCell<Vec<Transaction>>>,
    transactions: usize,
    fail_at: Option<usize>,
}

impl FakeStmpe811 {
    pub fn new() -> Self {
        let mut registers = [0u8; 256];
        registers[reg::CHIP_ID as usize] = 0x08;
        registers[reg::CHIP_ID as usize + 1] = 0x11;
        registers[reg::ID_VER as usize] = 0x03;
        Self {
            registers,
            pointer: 0,
            fifo: VecDeque::new(),
            late: Vec::new(),
            pops: 0,
            log: Rc::new(RefCell::new(Vec::new())),
            transactions: 0,
            fail_at: None,
        }
    }

    pub fn set_register(&mut self, register: u8, value: u8) {
        self.registers[register as usize] = value;
    }

    pub fn set_chip_id(&mut self, id: u16) {
        let [hi, lo] = id.to_be_bytes();
        self.set_register(reg::CHIP_ID, hi);
        self.set_register(reg::CHIP_ID + 1, lo);
    }

    /// Queue a raw sample
    pub fn queue(&mut self, x: u16, y: u16, z: u16) {
        self.fifo.push_back(RawSample { x, y, z });
    }

    /// Queue a raw sample once `pops` samples have been read out
    pub fn queue_after_pops(&mut self, pops: usize, x: u16, y: u16, z: u16) {
        self.late.push((pops, RawSample { x, y, z }));
    }

    /// Fail the transaction with this zero-based index
    pub fn fail_at(&mut self, index: usize) {
        self.fail_at = Some(index);
    }

    pub fn log(&self) -> Vec<Transaction> {
        self.log.borrow().clone()
    }

    /// Handle to the log that outlives the bus
    pub fn share_log(&self) -> Rc<RefCell<Vec<Transaction>>> {
        Rc::clone(&self.log)
    }

    pub fn clear_log(&mut self) {
        self.log.borrow_mut().clear();
    }

    /// Two-byte writes as `(register, value)` pairs
    pub fn register_writes(&self) -> Vec<(u8, u8)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|t| match t {
                Transaction::Write(bytes) if bytes.len() == 2 => Some((bytes[0], bytes[1])),
                _ => None,
            })
            .collect()
    }

    fn write(&mut self, bytes: &[u8]) {
        let Some((&register, rest)) = bytes.split_first() else {
            return;
        };
        self.pointer = register;

        if let Some(&value) = rest.first() {
            self.registers[register as usize] = value;
            if register == reg::FIFO_STA && value & bits::FIFO_RESET != 0 {
                self.fifo.clear();
            }
        }
    }

    fn read(&mut self, buf: &mut [u8]) {
        let front = self.fifo.front().copied();
        let word = match (self.pointer, front) {
            (reg::TSC_DATA_X, Some(s)) => Some(s.x),
            (reg::TSC_DATA_Y, Some(s)) => Some(s.y),
            (reg::TSC_DATA_Z, Some(s)) => Some(s.z),
            _ => None,
        };

        match word {
            Some(word) => {
                let bytes = word.to_be_bytes();
                for (i, b) in buf.iter_mut().enumerate() {
                    *b = bytes.get(i).copied().unwrap_or(0);
                }
                if self.pointer == reg::TSC_DATA_Z {
                    self.pop();
                }
            }
            None if self.pointer == reg::FIFO_SIZE => {
                buf.fill(0);
                buf[0] = self.fifo.len() as u8;
            }
            None => {
                for (i, b) in buf.iter_mut().enumerate() {
                    *b = self.registers[self.pointer as usize + i];
                }
            }
        }
    }

    fn pop(&mut self) {
        self.fifo.pop_front();
        self.pops += 1;

        let pops = self.pops;
        let (arrived, waiting): (Vec<_>, Vec<_>) =
            self.late.drain(..).partition(|(after, _)| *after <= pops);
        self.late = waiting;
        self.fifo.extend(arrived.into_iter().map(|(_, s)| s));
    }
}

impl ErrorType for FakeStmpe811 {
    type Error = FakeBusError;
}

impl I2c for FakeStmpe811 {
    fn transaction(
        &mut self,
        _address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations {
            let index = self.transactions;
            self.transactions += 1;
            if self.fail_at == Some(index) {
                return Err(FakeBusError);
            }

            match op {
                Operation::Write(bytes) => {
                    self.write(bytes);
                    self.log.borrow_mut().push(Transaction::Write(bytes.to_vec()));
                }
                Operation::Read(buf) => {
                    let register = self.pointer;
                    self.read(buf);
                    self.log.borrow_mut().push(Transaction::Read {
                        register,
                        len: buf.len(),
                    });
                }
            }
        }
        Ok(())
    }
}
