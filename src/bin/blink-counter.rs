#![no_main]
#![no_std]

//! Four LEDs blinking independently plus a two digit 74'4511/74HC164
//! display counting up, everything polled from `idle`.

use panic_abort as _;
use rtic::app;

use stm32f1xx_hal::flash::FlashExt;
use stm32f1xx_hal::gpio::{ErasedPin, GpioExt, Output, PinState, PushPull};

use systick_monotonic::Systick;

use led744511_tasks::*;

//-----------------------------------------------------------------------------

type OutPin = ErasedPin<Output<PushPull>>;

//-----------------------------------------------------------------------------

#[app(device = stm32f1xx_hal::pac, peripherals = true, dispatchers = [RTCALARM])]
mod app {
    use super::*;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        leds: TaskSet<OutPin, { config::MAX_LED_TASKS }>,
        display: SerialDisplay<OutPin>,
        counter: IntervalTimer,
    }

    #[monotonic(binds = SysTick, default = true)]
    type MonoTimer = Systick<{ config::SYSTICK_RATE_HZ }>;

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        use stm32f1xx_hal::prelude::_fugit_RateExtU32;
        use stm32f1xx_hal::prelude::_stm32_hal_rcc_RccExt;

        let mut flash = ctx.device.FLASH.constrain();

        let mut gpioa = ctx.device.GPIOA.split();
        let mut gpiob = ctx.device.GPIOB.split();

        let rcc = ctx.device.RCC.constrain();
        let clocks = rcc
            .cfgr
            .use_hse(config::MCU_XTAL_HZ.Hz())
            .sysclk(32u32.MHz())
            .freeze(&mut flash.acr);

        let mono = Systick::new(ctx.core.SYST, clocks.sysclk().to_Hz());

        //---------------------------------------------------------------------

        let led_pins: [OutPin; config::MAX_LED_TASKS] = [
            gpioa
                .pa0
                .into_push_pull_output_with_state(&mut gpioa.crl, PinState::Low)
                .erase(),
            gpioa
                .pa1
                .into_push_pull_output_with_state(&mut gpioa.crl, PinState::Low)
                .erase(),
            gpioa
                .pa2
                .into_push_pull_output_with_state(&mut gpioa.crl, PinState::Low)
                .erase(),
            gpioa
                .pa3
                .into_push_pull_output_with_state(&mut gpioa.crl, PinState::Low)
                .erase(),
        ];

        let mut leds = TaskSet::new();
        for (pin, (on, off)) in led_pins.into_iter().zip(config::LED_TIMINGS_MS) {
            let mut led = LedTask::new(pin);
            led.begin(on.millis(), off.millis()).unwrap();
            if leds.push(led).is_err() {
                unreachable!();
            }
        }

        //---------------------------------------------------------------------

        // latches and /CLR idle high before they become outputs
        let clk = gpiob
            .pb12
            .into_push_pull_output_with_state(&mut gpiob.crh, PinState::High)
            .erase();
        let din = gpiob
            .pb13
            .into_push_pull_output_with_state(&mut gpiob.crh, PinState::Low)
            .erase();
        let le_tens = gpiob
            .pb14
            .into_push_pull_output_with_state(&mut gpiob.crh, PinState::High)
            .erase();
        let le_ones = gpiob
            .pb15
            .into_push_pull_output_with_state(&mut gpiob.crh, PinState::High)
            .erase();
        let clr = gpiob
            .pb11
            .into_push_pull_output_with_state(&mut gpiob.crh, PinState::High)
            .erase();

        let mut display = SerialDisplay::dual(clk, din, le_tens, le_ones)
            .and_then(|d| d.with_clear(clr))
            .unwrap();
        display.write_bcd(0).unwrap();

        let mut counter = IntervalTimer::new();
        counter.configure(
            config::COUNTER_PERIOD_MS.millis(),
            config::COUNTER_PERIOD_MS.millis(),
        );

        //---------------------------------------------------------------------

        (
            Shared {},
            Local {
                leds,
                display,
                counter,
            },
            init::Monotonics(mono),
        )
    }

    //-------------------------------------------------------------------------

    #[idle(local = [leds, display, counter, count: i32 = 0])]
    fn idle(ctx: idle::Context) -> ! {
        let mut clock = FnClock(|| monotonics::now().ticks() as u32);

        loop {
            let now = clock.now();

            ctx.local.leds.poll_all(now).ok();

            if let Some(TaskState::Active) = ctx.local.counter.poll(now) {
                *ctx.local.count = (*ctx.local.count + 1) % 100;
                ctx.local
                    .display
                    .set_decimal_points(false, *ctx.local.count % 2 == 0);
                ctx.local.display.write_bcd(*ctx.local.count).ok();
            }
        }
    }
}
