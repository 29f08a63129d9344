use super::*;
use crate::error::TrimError;

/// Scanner over the byte positions of a path data string.
struct Tokenizer<'a> {
	bytes: &'a [u8],
	position: usize,
}

impl<'a> Tokenizer<'a> {
	fn new(input: &'a str) -> Self {
		Tokenizer { bytes: input.as_bytes(), position: 0 }
	}

	fn skip_separators(&mut self) {
		while let Some(&byte) = self.bytes.get(self.position) {
			if byte.is_ascii_whitespace() || byte == b',' {
				self.position += 1;
			} else {
				break;
			}
		}
	}

	fn at_end(&mut self) -> bool {
		self.skip_separators();
		self.position >= self.bytes.len()
	}

	/// Consumes a command letter if the next non-separator byte is alphabetic.
	fn next_command(&mut self) -> Option<u8> {
		self.skip_separators();
		match self.bytes.get(self.position) {
			Some(&byte) if byte.is_ascii_alphabetic() => {
				self.position += 1;
				Some(byte)
			}
			_ => None,
		}
	}

	fn error(&self, reason: impl Into<String>) -> TrimError {
		TrimError::ParseError {
			position: self.position,
			reason: reason.into(),
		}
	}

	fn next_number(&mut self) -> Result<f64, TrimError> {
		self.skip_separators();
		let start = self.position;
		let mut end = start;
		// Sign, mantissa with optional decimal point, optional exponent
		if matches!(self.bytes.get(end), Some(b'+') | Some(b'-')) {
			end += 1;
		}
		while matches!(self.bytes.get(end), Some(byte) if byte.is_ascii_digit()) {
			end += 1;
		}
		if matches!(self.bytes.get(end), Some(b'.')) {
			end += 1;
			while matches!(self.bytes.get(end), Some(byte) if byte.is_ascii_digit()) {
				end += 1;
			}
		}
		if matches!(self.bytes.get(end), Some(b'e') | Some(b'E')) {
			let mut exponent_end = end + 1;
			if matches!(self.bytes.get(exponent_end), Some(b'+') | Some(b'-')) {
				exponent_end += 1;
			}
			if matches!(self.bytes.get(exponent_end), Some(byte) if byte.is_ascii_digit()) {
				end = exponent_end;
				while matches!(self.bytes.get(end), Some(byte) if byte.is_ascii_digit()) {
					end += 1;
				}
			}
		}
		if end == start {
			return Err(self.error("expected a number"));
		}
		// The scanned range is ASCII by construction
		let text = std::str::from_utf8(&self.bytes[start..end]).map_err(|_| self.error("expected a number"))?;
		let value: f64 = text.parse().map_err(|_| self.error(format!("`{text}` is not a valid number")))?;
		self.position = end;
		Ok(value)
	}

	fn next_point(&mut self) -> Result<DVec2, TrimError> {
		let x = self.next_number()?;
		let y = self.next_number()?;
		Ok(DVec2::new(x, y))
	}

	/// Whether the next non-separator byte starts a number, meaning the previous command repeats.
	fn peek_number(&mut self) -> bool {
		self.skip_separators();
		matches!(self.bytes.get(self.position), Some(byte) if byte.is_ascii_digit() || matches!(byte, b'+' | b'-' | b'.'))
	}
}

impl PathData {
	/// Parses a path data string of absolute `M`, `L`, `C`, and `Z` commands.
	///
	/// Separators are whitespace and commas. A command letter followed by several
	/// coordinate groups repeats the command, except `M`, whose extra pairs are
	/// line segments. Relative (lowercase) and other command letters are rejected.
	pub fn from_path_data(input: &str, style: PathStyle) -> Result<PathData, TrimError> {
		let mut tokenizer = Tokenizer::new(input);
		let mut subpaths: Vec<SubPath> = Vec::new();
		let mut commands: Vec<Command> = Vec::new();

		let flush = |commands: &mut Vec<Command>, subpaths: &mut Vec<SubPath>| {
			if !commands.is_empty() {
				subpaths.push(SubPath { commands: std::mem::take(commands) });
			}
		};

		while !tokenizer.at_end() {
			let Some(letter) = tokenizer.next_command() else {
				return Err(tokenizer.error("expected a command letter"));
			};
			match letter {
				b'M' => {
					flush(&mut commands, &mut subpaths);
					commands.push(Command::MoveTo { to: tokenizer.next_point()? });
					while tokenizer.peek_number() {
						commands.push(Command::LineTo { to: tokenizer.next_point()? });
					}
				}
				b'L' => {
					if commands.is_empty() {
						return Err(tokenizer.error("path data must start with a move command"));
					}
					commands.push(Command::LineTo { to: tokenizer.next_point()? });
					while tokenizer.peek_number() {
						commands.push(Command::LineTo { to: tokenizer.next_point()? });
					}
				}
				b'C' => {
					if commands.is_empty() {
						return Err(tokenizer.error("path data must start with a move command"));
					}
					loop {
						let handle_start = tokenizer.next_point()?;
						let handle_end = tokenizer.next_point()?;
						let to = tokenizer.next_point()?;
						commands.push(Command::CubicTo { handle_start, handle_end, to });
						if !tokenizer.peek_number() {
							break;
						}
					}
				}
				b'Z' => {
					if commands.is_empty() {
						return Err(tokenizer.error("close command without an open subpath"));
					}
					commands.push(Command::Close);
					flush(&mut commands, &mut subpaths);
				}
				other => {
					return Err(tokenizer.error(format!("unsupported command letter `{}`; only absolute M, L, C, and Z are recognized", other as char)));
				}
			}
		}
		flush(&mut commands, &mut subpaths);

		Ok(PathData { subpaths, style })
	}

	/// Serializes the path as absolute `M`/`L`/`C`/`Z` path data.
	/// Parsing the output reproduces the same geometry exactly, since `f64`
	/// display round-trips.
	pub fn to_path_data(&self) -> String {
		let mut output = String::new();
		for subpath in &self.subpaths {
			for command in &subpath.commands {
				if !output.is_empty() {
					output.push(' ');
				}
				match *command {
					Command::MoveTo { to } => output.push_str(&format!("M {} {}", to.x, to.y)),
					Command::LineTo { to } => output.push_str(&format!("L {} {}", to.x, to.y)),
					Command::CubicTo { handle_start, handle_end, to } => {
						output.push_str(&format!("C {} {} {} {} {} {}", handle_start.x, handle_start.y, handle_end.x, handle_end.y, to.x, to.y))
					}
					Command::Close => output.push('Z'),
				}
			}
		}
		output
	}
}
