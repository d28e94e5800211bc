//! Interactive correction loop.
//!
//! The session owns the working text and the carousel for one pass and
//! borrows the dictionary so learned words outlive the pass. Pressing Esc
//! or `q` at any prompt ends the whole run.

use crate::checker::tokenizer::{context_window, render_context, tokenize};
use crate::checker::{
    add_to_dictionary, apply_replacement, check_spelling, Carousel, Dictionary, Page, Scope,
    Selection, Suggestion,
};
use crate::cli::output;
use crate::error::parse_position;
use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every misspelling was resolved.
    Finished,
    /// The user stopped checking this text.
    Stopped,
    /// The user asked to quit the program.
    Quit,
}

enum Step {
    Continue,
    Stop,
    Quit,
}

enum Action {
    Replace(usize),
    Custom,
    Learn,
    Remove,
    More,
    Less,
    Back,
}

pub struct Session<'a> {
    dictionary: &'a mut Dictionary,
    text: String,
    carousel: Carousel,
    context_radius: usize,
    colored: bool,
    theme: ColorfulTheme,
    corrections: usize,
}

impl<'a> Session<'a> {
    pub fn new(
        dictionary: &'a mut Dictionary,
        text: String,
        context_radius: usize,
        colored: bool,
    ) -> Self {
        let carousel = check_spelling(&tokenize(&text), dictionary);
        Self {
            dictionary,
            text,
            carousel,
            context_radius,
            colored,
            theme: ColorfulTheme::default(),
            corrections: 0,
        }
    }

    /// Occurrences replaced in accepted corrections so far.
    pub fn corrections(&self) -> usize {
        self.corrections
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn run(&mut self) -> Result<SessionOutcome> {
        log::info!("{} misspelling(s) to review", self.carousel.len());

        while !self.carousel.is_empty() {
            output::print_carousel_position(&self.carousel, self.colored);

            let choice = Select::with_theme(&self.theme)
                .with_prompt("What would you like to do?")
                .items(&[
                    "Select this word",
                    "Next word",
                    "Previous word",
                    "Choose a word by typing it",
                    "List all misspelled words",
                    "Stop checking this text",
                ])
                .default(0)
                .interact_opt()?;

            let step = match choice {
                None => Step::Quit,
                Some(0) => self.word_menu(Selection::Current)?,
                Some(1) => {
                    self.carousel.step_right();
                    Step::Continue
                }
                Some(2) => {
                    self.carousel.step_left();
                    Step::Continue
                }
                Some(3) => match self.prompt_word()? {
                    Some(selection) => self.word_menu(selection)?,
                    None => Step::Continue,
                },
                Some(4) => {
                    output::print_misspelling_list(&self.carousel);
                    Step::Continue
                }
                Some(_) => Step::Stop,
            };

            match step {
                Step::Continue => {}
                Step::Stop => return Ok(SessionOutcome::Stopped),
                Step::Quit => return Ok(SessionOutcome::Quit),
            }
        }

        println!("\nNo misspelled words left.");
        Ok(SessionOutcome::Finished)
    }

    /// Ask for one of the pending words, by spelling or by its number in
    /// the list. An empty answer goes back.
    fn prompt_word(&self) -> Result<Option<Selection>> {
        let known = self.carousel.distinct_words();
        let len = self.carousel.len();
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt("Word or number to correct (empty to go back)")
            .allow_empty(true)
            .validate_with(|input: &String| -> Result<(), String> {
                let trimmed = input.trim();
                if trimmed.is_empty() || known.contains(&trimmed.to_lowercase()) {
                    return Ok(());
                }
                match parse_position(trimmed) {
                    Ok(index) if index < len => Ok(()),
                    Ok(_) => Err(format!("there are only {} misspelled words", len)),
                    Err(e) if trimmed.chars().all(|c| c.is_ascii_digit() || c == '-') => {
                        Err(e.to_string())
                    }
                    Err(_) => Err(format!("'{}' is not one of the misspelled words", trimmed)),
                }
            })
            .interact_text()?;

        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        if known.contains(&answer.to_lowercase()) {
            return Ok(Some(Selection::Word(answer.to_string())));
        }
        Ok(Some(match parse_position(answer) {
            Ok(index) => Selection::Index(index),
            Err(_) => Selection::Word(answer.to_string()),
        }))
    }

    fn word_menu(&mut self, selection: Selection) -> Result<Step> {
        let index = match self.carousel.resolve(&selection) {
            Ok(index) => index,
            Err(e) => {
                println!("{}", e);
                return Ok(Step::Continue);
            }
        };

        if let Some(entry) = self.carousel.get(index) {
            output::print_selected(entry, &self.context_for(index), self.colored);
        }
        let suggestions = self.carousel.suggestions_for(index, self.dictionary)?.to_vec();
        let mut page = Page::first(suggestions.len());

        loop {
            output::print_suggestion_page(&suggestions, &page, self.colored);

            let mut labels = Vec::new();
            let mut actions = Vec::new();
            for (offset, suggestion) in suggestions[page.start..page.end].iter().enumerate() {
                labels.push(format!("{}. {}", page.start + offset + 1, suggestion.candidate));
                actions.push(Action::Replace(page.start + offset));
            }
            if page.has_more {
                labels.push("More suggestions".to_string());
                actions.push(Action::More);
            }
            if page.has_previous {
                labels.push("Previous suggestions".to_string());
                actions.push(Action::Less);
            }
            for (label, action) in [
                ("Write my own replacement", Action::Custom),
                ("Add to dictionary", Action::Learn),
                ("Not a misspelling, remove from the list", Action::Remove),
                ("Back", Action::Back),
            ] {
                labels.push(label.to_string());
                actions.push(action);
            }

            let Some(choice) = Select::with_theme(&self.theme)
                .with_prompt("Choose an option")
                .items(&labels)
                .default(0)
                .interact_opt()?
            else {
                return Ok(Step::Quit);
            };

            match &actions[choice] {
                Action::Replace(i) => return self.replace(index, &suggestions[*i]),
                Action::Custom => {
                    let custom: String = Input::with_theme(&self.theme)
                        .with_prompt("Replacement")
                        .interact_text()?;
                    let candidate = Suggestion {
                        candidate: custom.trim().to_string(),
                        distance: 0,
                    };
                    return self.replace(index, &candidate);
                }
                Action::Learn => {
                    let word = self
                        .carousel
                        .get(index)
                        .map(|e| e.word.clone())
                        .unwrap_or_default();
                    let removed = add_to_dictionary(self.dictionary, &mut self.carousel, &word);
                    println!(
                        "Added \"{}\" to the dictionary ({} occurrence(s) resolved)",
                        word, removed
                    );
                    return Ok(Step::Continue);
                }
                Action::Remove => {
                    if let Err(e) = self.carousel.delete(index) {
                        println!("{}", e);
                    } else {
                        println!("Word removed from the list");
                    }
                    return Ok(Step::Continue);
                }
                Action::More => page = page.next(suggestions.len()),
                Action::Less => page = page.previous(suggestions.len()),
                Action::Back => return Ok(Step::Continue),
            }
        }
    }

    fn replace(&mut self, index: usize, choice: &Suggestion) -> Result<Step> {
        println!("You have selected \"{}\" to replace with", choice.candidate);

        let Some(all) = Confirm::with_theme(&self.theme)
            .with_prompt("Replace all occurrences?")
            .default(false)
            .interact_opt()?
        else {
            return Ok(Step::Quit);
        };
        let scope = if all {
            Scope::AllOccurrences
        } else {
            Scope::SingleOccurrence
        };

        let pending = apply_replacement(
            &self.text,
            &self.carousel,
            index,
            &choice.candidate,
            scope,
        );
        let correction = match pending {
            Ok(correction) => correction,
            Err(e) => {
                println!("{}", e);
                return Ok(Step::Continue);
            }
        };
        output::print_preview(&correction.text, self.colored);

        match Confirm::with_theme(&self.theme)
            .with_prompt("Save and continue?")
            .default(true)
            .interact_opt()?
        {
            None => Ok(Step::Quit),
            Some(true) => {
                self.corrections += correction.replaced;
                correction.commit(&mut self.text, &mut self.carousel);
                Ok(Step::Continue)
            }
            Some(false) => {
                println!("Change discarded");
                Ok(Step::Continue)
            }
        }
    }

    /// Context around the entry at `index`, taken from the current text.
    fn context_for(&self, index: usize) -> String {
        let Some(entry) = self.carousel.get(index) else {
            return String::new();
        };
        let tokens = tokenize(&self.text);
        let position = tokens
            .iter()
            .position(|t| t.start == entry.start)
            .unwrap_or(entry.original_index);
        render_context(context_window(&tokens, position, self.context_radius))
    }
}
