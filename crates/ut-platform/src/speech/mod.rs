mod command;

pub use command::CommandSpeechSynthesizer;
