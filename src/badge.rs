//! ESP32-S3 badge bring-up: pins, clocks, the ST7789 LCD and the buttons.
//!
//! Only what the game needs is wired here — display (with its backlight),
//! and the d-pad plus A/Start/Select for input. Everything else on the
//! board stays untouched.

use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::{
    Async,
    assign_resources,
    clock::CpuClock,
    dma::{
        DmaRxBuf,
        DmaTxBuf,
    },
    dma_buffers,
    gpio::{
        Input,
        InputConfig,
        Level,
        Output,
        OutputConfig,
        Pull,
    },
    spi::master::Spi,
    time::Rate,
};

assign_resources! {
    pub Resources<'d> {
        display: DisplayResources<'d> {
            dc: GPIO15,
            rst: GPIO7,
            sck: GPIO4,
            cs: GPIO6,
            miso: GPIO16,
            mosi: GPIO5,
            backlight: GPIO19,
            spi: SPI2,
            dma: DMA_CH0,
        },
        buttons: ButtonResources<'d> {
            up: GPIO11,
            down: GPIO1,
            left: GPIO21,
            right: GPIO2,
            a: GPIO13,
            start: GPIO12,
            select: GPIO45,
        },
    }
}

/// Initialise the badge hardware and return the raw peripheral set.
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    esp_hal::init(config)
}

type SpiInterface<'a> = mipidsi::interface::SpiInterface<
    'a,
    ExclusiveDevice<esp_hal::spi::master::SpiDmaBus<'a, Async>, Output<'a>, esp_hal::delay::Delay>,
    Output<'a>,
>;

/// The badge's ST7789 LCD, ready to draw on with `embedded-graphics`.
pub type Display<'a> = mipidsi::Display<SpiInterface<'a>, mipidsi::models::ST7789, Output<'a>>;

impl<'a> From<DisplayResources<'a>> for Display<'a> {
    fn from(res: DisplayResources<'a>) -> Self {
        // The game always wants the panel lit.
        let _backlight = Output::new(res.backlight, Level::High, OutputConfig::default());

        let (rx_buffer, rx_descriptors, tx_buffer, tx_descriptors) = dma_buffers!(32000);
        let dma_rx_buf = DmaRxBuf::new(rx_descriptors, rx_buffer).unwrap();
        let dma_tx_buf = DmaTxBuf::new(tx_descriptors, tx_buffer).unwrap();

        let mut delay = esp_hal::delay::Delay::new();

        let dc = Output::new(res.dc, Level::Low, OutputConfig::default());
        let mut rst = Output::new(res.rst, Level::Low, OutputConfig::default());
        rst.set_high();

        let spi = Spi::new(
            res.spi,
            esp_hal::spi::master::Config::default().with_frequency(Rate::from_mhz(80)),
        )
        .unwrap()
        .with_sck(res.sck)
        .with_mosi(res.mosi)
        .with_miso(res.miso)
        .with_dma(res.dma)
        .with_buffers(dma_rx_buf, dma_tx_buf)
        .into_async();

        let cs = Output::new(res.cs, Level::High, OutputConfig::default());
        let spi_device = ExclusiveDevice::new(spi, cs, delay).unwrap();

        let buffer = crate::mk_static!([u8; 32000], [0_u8; 32000]);
        let di = mipidsi::interface::SpiInterface::new(spi_device, dc, buffer);

        mipidsi::Builder::new(mipidsi::models::ST7789, di)
            .reset_pin(rst)
            .display_size(170, 320)
            .invert_colors(mipidsi::options::ColorInversion::Inverted)
            .orientation(
                mipidsi::options::Orientation::new().rotate(mipidsi::options::Rotation::Deg90),
            )
            .display_offset(35, 0)
            .init(&mut delay)
            .unwrap()
    }
}

/// The buttons the game uses, ready for polling or async edge detection.
pub struct Buttons {
    pub up: Input<'static>,
    pub down: Input<'static>,
    pub left: Input<'static>,
    pub right: Input<'static>,
    pub a: Input<'static>,
    pub start: Input<'static>,
    pub select: Input<'static>,
}

const DEBOUNCE_MS: u64 = 20;

impl From<ButtonResources<'static>> for Buttons {
    fn from(res: ButtonResources<'static>) -> Self {
        let pull_up = InputConfig::default().with_pull(Pull::Up);
        Self {
            up: Input::new(res.up, pull_up),
            down: Input::new(res.down, pull_up),
            left: Input::new(res.left, pull_up),
            right: Input::new(res.right, pull_up),
            a: Input::new(res.a, pull_up),
            start: Input::new(res.start, pull_up),
            select: Input::new(res.select, InputConfig::default().with_pull(Pull::Down)),
        }
    }
}

impl Buttons {
    /// Wait for a debounced button press (falling edge, active low).
    pub async fn debounce_press(button: &mut Input<'_>) {
        loop {
            button.wait_for_falling_edge().await;
            embassy_time::Timer::after(embassy_time::Duration::from_millis(DEBOUNCE_MS)).await;
            if button.is_low() {
                return;
            }
        }
    }
}
