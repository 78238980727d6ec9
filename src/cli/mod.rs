use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Tempo of the built-in simulated clock signal, in BPM
    #[arg(long, default_value_t = 120)]
    pub sim_bpm: u32,

    /// Duty cycle of the simulated clock signal (0.0 - 1.0)
    #[arg(long, default_value_t = 0.25)]
    pub sim_duty: f32,

    /// Seed for the humanize jitter source (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run without the terminal inspector
    #[arg(long)]
    pub headless: bool,
}
