//! Command/data framing over a shared SPI bus.
//!
//! Every transfer is framed the same way: D/C is driven first (low for a
//! command, high for data), then CS is asserted, the bytes are clocked out,
//! the bus is flushed and CS is released. The controller samples D/C at the
//! start of the transfer, so the pin order must never change.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
#[cfg(not(feature = "async"))]
use embedded_hal::spi::SpiBus;
#[cfg(feature = "async")]
use embedded_hal_async::spi::SpiBus;

use crate::Error;

pub struct SpiInterface<SPI, CS, DC> {
    spi: SPI,
    cs: CS,
    dc: DC,
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "SpiInterface",),
    async(feature = "async", keep_self)
)]
impl<SPI, CS, DC, E> SpiInterface<SPI, CS, DC>
where
    SPI: SpiBus<u8, Error = E>,
    CS: OutputPin<Error = Infallible>,
    DC: OutputPin<Error = Infallible>,
{
    pub fn new(spi: SPI, cs: CS, dc: DC) -> Self {
        Self { spi, cs, dc }
    }

    /// Give back the bus and the two framing pins.
    pub fn release(self) -> (SPI, CS, DC) {
        (self.spi, self.cs, self.dc)
    }

    /// Send a single command byte (D/C low).
    pub async fn send_command(&mut self, command: u8) -> Result<(), Error<E>> {
        self.dc.set_low().map_err(Error::Pin)?;
        self.cs.set_low().map_err(Error::Pin)?;
        let result = self.transfer(&[command]).await;
        self.cs.set_high().map_err(Error::Pin)?;
        result
    }

    /// Send parameter or pixel bytes (D/C high) in one CS frame.
    pub async fn send_data(&mut self, data: &[u8]) -> Result<(), Error<E>> {
        self.begin_data()?;
        let result = self.transfer(data).await;
        self.cs.set_high().map_err(Error::Pin)?;
        result
    }

    /// Write command with optional parameters
    pub async fn write_command(&mut self, command: u8, params: &[u8]) -> Result<(), Error<E>> {
        self.send_command(command).await?;
        if !params.is_empty() {
            self.send_data(params).await?;
        }
        Ok(())
    }

    /// Open a data frame that spans several `write_data` calls.
    pub fn begin_data(&mut self) -> Result<(), Error<E>> {
        self.dc.set_high().map_err(Error::Pin)?;
        self.cs.set_low().map_err(Error::Pin)
    }

    /// Clock out one chunk of an open data frame.
    pub async fn write_data(&mut self, data: &[u8]) -> Result<(), Error<E>> {
        if let Err(e) = self.spi.write(data).await {
            self.cs.set_high().map_err(Error::Pin)?;
            return Err(Error::Comm(e));
        }
        Ok(())
    }

    /// Close a data frame opened with `begin_data`.
    pub async fn end_data(&mut self) -> Result<(), Error<E>> {
        let result = self.spi.flush().await.map_err(Error::Comm);
        self.cs.set_high().map_err(Error::Pin)?;
        result
    }

    async fn transfer(&mut self, bytes: &[u8]) -> Result<(), Error<E>> {
        self.spi.write(bytes).await.map_err(Error::Comm)?;
        self.spi.flush().await.map_err(Error::Comm)
    }
}
