//! SDR Control-Panel Main Application
//!
//! Entry point for the STM32G474 front-panel controller.
//! Initializes hardware and spawns the sampling, panel and CAT tasks.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::{error, info, warn};
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::usb::{self, Driver};
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_usb::class::cdc_acm::{CdcAcmClass, State};
use embassy_usb::{Builder, UsbDevice};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use sdr_panel::hal::{BlockingDelay, LadderAdc, SampleClock};
use sdr_panel::input::{AnalogSource, ButtonLadder, ButtonPipeline, PanelButton, RotaryDecoder};
use sdr_panel::prelude::*;
use sdr_panel::protocol::CatSession;
use sdr_panel::radio::{Effects, LoPlan, PanelEncoder, PttLine, RadioCollaborator, RadioState};
use sdr_panel::usb::{device, CdcBridge, UsbDeviceInfo};

bind_interrupts!(struct Irqs {
    USB_LP => usb::InterruptHandler<peripherals::USB>;
});

type UsbDriver = Driver<'static, peripherals::USB>;

/// Filter state ticked by the sampler
static BUTTONS: ButtonPipeline = ButtonPipeline::new();

/// Ladder ADC, shared by the sampler and the fallback read
static LADDER: Mutex<ThreadModeRawMutex, RefCell<Option<LadderAdc<'static>>>> =
    Mutex::new(RefCell::new(None));

/// Radio state and its collaborator, shared by the panel and CAT tasks
static PANEL: Mutex<ThreadModeRawMutex, RefCell<Option<Panel>>> = Mutex::new(RefCell::new(None));

static CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static CDC_STATE: StaticCell<State<'static>> = StaticCell::new();

struct Panel {
    state: RadioState,
    collaborator: PanelCollaborator,
    effects: Effects,
}

/// Run `f` against the panel, if it has been installed
fn with_panel<R>(f: impl FnOnce(&mut Panel) -> R) -> Option<R> {
    PANEL.lock(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Ladder reads through the shared ADC
struct SharedLadder;

impl AnalogSource for SharedLadder {
    fn read(&mut self) -> u16 {
        LADDER.lock(|cell| {
            cell.borrow_mut()
                .as_mut()
                .map_or(BUTTON_OUTPUT_UP, AnalogSource::read)
        })
    }
}

/// Everything outside the panel logic: PTT line, and the display and
/// synthesizer hooks, logged until those boards are attached
struct PanelCollaborator {
    ptt: PttLine<Output<'static>>,
}

impl RadioCollaborator for PanelCollaborator {
    fn retune(&mut self, state: &RadioState) {
        let plan = LoPlan::for_state(state);
        info!("Retune {} ({}) {}", state.txrx_frequency(), state.current_band(), plan);
    }

    fn show_frequency(&mut self, state: &RadioState) {
        info!(
            "VFO {} {} / {}",
            state.active_vfo(),
            state.vfo_frequency(VfoSelect::A),
            state.vfo_frequency(VfoSelect::B)
        );
    }

    fn mode_changed(&mut self, state: &RadioState) {
        info!("Mode {} / {}", state.demodulation(), state.transmit_mode());
    }

    fn volume_changed(&mut self, volume: AudioVolume) {
        info!("Volume {}", volume);
    }

    fn mic_gain_live(&mut self, gain: MicGain) {
        info!("Mic gain {}", gain);
    }

    fn noise_reduction_changed(&mut self, option: NoiseReduction) {
        info!("{}", option);
    }

    fn notch_changed(&mut self, enabled: bool) {
        info!("Notch {}", enabled);
    }

    fn persist_settings(&mut self, _state: &RadioState) {
        debug!("Settings marked for persistence");
    }

    fn set_ptt(&mut self, ptt: PttState) {
        if self.ptt.set(ptt).is_err() {
            error!("PTT line failed");
        }
    }

    fn panel_action(&mut self, button: PanelButton, _state: &RadioState) {
        info!("Panel {}", button);
    }
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("SDR panel firmware v{}", env!("CARGO_PKG_VERSION"));

    let mut config = embassy_stm32::Config::default();
    {
        use embassy_stm32::rcc::{mux, Hsi48Config};
        config.rcc.hsi48 = Some(Hsi48Config { sync_from_usb: true });
        config.rcc.mux.clk48sel = mux::Clk48sel::HSI48;
    }
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    LADDER.lock(|cell| {
        *cell.borrow_mut() = Some(LadderAdc::new(p.ADC1, p.PA0));
    });

    let ptt = match PttLine::new(Output::new(p.PB0, Level::High, Speed::Low)) {
        Ok(ptt) => ptt,
        Err(e) => match e {},
    };
    PANEL.lock(|cell| {
        *cell.borrow_mut() = Some(Panel {
            state: RadioState::new(),
            collaborator: PanelCollaborator { ptt },
            effects: Effects::new(),
        });
    });

    let encoders = [
        (PanelEncoder::CenterTune, Input::new(p.PB4, Pull::Up), Input::new(p.PB5, Pull::Up)),
        (PanelEncoder::FineTune, Input::new(p.PB6, Pull::Up), Input::new(p.PB7, Pull::Up)),
        (PanelEncoder::Volume, Input::new(p.PC6, Pull::Up), Input::new(p.PC7, Pull::Up)),
    ];

    let driver = Driver::new(p.USB, Irqs, p.PA12, p.PA11);
    let info = UsbDeviceInfo::default();
    info!("{}", info);
    let mut builder = Builder::new(
        driver,
        device::usb_config(&info),
        CONFIG_DESC.init([0; 256]),
        BOS_DESC.init([0; 256]),
        &mut [],
        CONTROL_BUF.init([0; 64]),
    );
    // 64 fits the u16 the class takes.
    #[allow(clippy::cast_possible_truncation)]
    let class = CdcAcmClass::new(
        &mut builder,
        CDC_STATE.init(State::new()),
        USB_CDC_PACKET_SIZE as u16,
    );
    let usb = builder.build();

    spawner.must_spawn(usb_task(usb));
    spawner.must_spawn(cat_task(class));
    spawner.must_spawn(control_task());
    spawner.must_spawn(encoder_task(encoders));
    spawner.must_spawn(button_sampler_task());

    info!("Tasks spawned");
}

/// Fixed-rate ladder sampling
#[embassy_executor::task]
async fn button_sampler_task() {
    let timing = FilterTiming::default();
    BUTTONS.start(timing, &ButtonCalibration::default());

    let mut clock = SampleClock::from_rate(timing.sample_rate_hz());
    info!("{}", clock);
    let mut ladder = SharedLadder;
    loop {
        clock.tick().await;
        BUTTONS.tick(ladder.read());
    }
}

/// Button polling and dispatch
#[embassy_executor::task]
async fn control_task() {
    let ladder = ButtonLadder::default();
    let mut source = SharedLadder;
    let mut delay = BlockingDelay;
    let mut ticker = Ticker::every(Duration::from_millis(BUTTON_POLL_MS));

    loop {
        if let Some(reading) = BUTTONS.read_selected(&ladder, &mut source, &mut delay) {
            match ladder.classify(reading) {
                Some(button) => {
                    with_panel(|panel| {
                        panel.state.press_button(button, &mut panel.effects);
                        panel.effects.apply(&panel.state, &mut panel.collaborator);
                    });
                }
                None => warn!("Unclassified ladder reading {}", reading),
            }
        }
        ticker.next().await;
    }
}

/// Rotary encoder polling
#[embassy_executor::task]
async fn encoder_task(encoders: [(PanelEncoder, Input<'static>, Input<'static>); 3]) {
    let mut decoders = [RotaryDecoder::new(); 3];
    let mut ticker = Ticker::every(Duration::from_micros(ENCODER_POLL_US));

    loop {
        for ((encoder, a, b), decoder) in encoders.iter().zip(decoders.iter_mut()) {
            if let Some(direction) = decoder.update(a.is_high(), b.is_high()) {
                with_panel(|panel| {
                    panel
                        .state
                        .rotate_encoder(*encoder, direction.delta(), &mut panel.effects);
                    panel.effects.apply(&panel.state, &mut panel.collaborator);
                });
            }
        }
        ticker.next().await;
    }
}

/// CAT over the CDC ACM port
#[embassy_executor::task]
async fn cat_task(mut class: CdcAcmClass<'static, UsbDriver>) {
    let mut bridge = CdcBridge::new();
    let mut session = CatSession::new();

    loop {
        class.wait_connection().await;
        info!("CAT host connected");

        let result = device::pump(&mut class, &mut bridge, |bridge| {
            let serviced = with_panel(|panel| {
                session.service(bridge, &mut panel.state, &mut panel.collaborator)
            });
            if let Some(Err(e)) = serviced {
                error!("{}", e);
            }
        })
        .await;

        if let Err(e) = result {
            warn!("CAT link ended: {}", e);
        }
        bridge.reset();
        session = CatSession::new();
    }
}

/// USB device state machine
#[embassy_executor::task]
async fn usb_task(mut usb: UsbDevice<'static, UsbDriver>) -> ! {
    usb.run().await
}
