use crate::{
    connection::Connection,
    tag::{PagedMemory, PagedVariant, TagIoError},
};

/// Pages covered by a single read command
pub const PAGES_PER_READ: u16 = 4;

/// Bytes returned by a single read command
pub const BLOCK_SIZE: usize = 16;

/// Page granular reader over a connected paged memory, the connection closes when it is dropped
pub struct PageReader<'a> {
    connection: Connection<'a, dyn PagedMemory + 'a>,
}

impl<'a> PageReader<'a> {
    pub fn connect(memory: &'a dyn PagedMemory) -> Result<Self, TagIoError> {
        let connection = Connection::open(memory)?;
        Ok(Self { connection })
    }

    pub fn variant(&self) -> PagedVariant {
        self.connection.variant()
    }

    /// Read one 4 page block, no retries
    pub fn read_block(&self, start_page: u16) -> Result<Vec<u8>, TagIoError> {
        let mut block = self.connection.read_pages(start_page)?;
        block.truncate(BLOCK_SIZE);
        Ok(block)
    }
}
