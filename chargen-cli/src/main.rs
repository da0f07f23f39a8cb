use std::io::{self, Write};

use anyhow::{Context, Result};
use chargen_session::{GenerationRequest, GenerationSession};
use charrnn_http::CharRnnModel;

#[tokio::main]
async fn main() -> Result<()> {
  env_logger::init();

  let model_url = std::env::var("MODEL_URL")
    .with_context(|| "MODEL_URL variable unset, set it to the URL of a served char-rnn model")?;

  let seed = std::env::var("SEED").unwrap_or_else(|_| "B".to_string());

  let length = match std::env::var("LENGTH") {
    Ok(raw) => raw
      .parse::<u32>()
      .with_context(|| format!("LENGTH must be a positive integer, got '{}'", raw))?,
    Err(_) => 250,
  };

  println!("Loading model...");

  let session: GenerationSession<CharRnnModel> = GenerationSession::new();
  session
    .initialize(&model_url)
    .await
    .with_context(|| format!("Unable to load the model at '{}'", model_url))?;

  println!("Model loaded");
  println!("Type a sampling temperature (0.0 to 2.0) and press enter.");

  print!("> ");
  io::stdout().flush()?;
  for line in io::stdin().lines() {
    let line = line?;
    let input = line.trim();

    if input.is_empty() {
      print!("> ");
      io::stdout().flush()?;
      continue;
    }

    match input.parse::<f32>() {
      Ok(temperature) => match GenerationRequest::new(&seed, temperature, length) {
        Ok(request) => match session.generate(&request).await? {
          Some(result) => {
            for line in result.lines() {
              println!("{}", line);
            }
          }
          None => println!("Generation was skipped, the session is not ready."),
        },
        Err(err) => println!("{}", err),
      },
      Err(_) => println!("'{}' is not a temperature, expected a number like 0.5", input),
    }

    print!("> ");
    io::stdout().flush()?;
  }

  Ok(())
}
