use crate::models::{ChatMessage, Sender};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const RESPONSES: &[&str] = &[
    "I recommend checking the soil moisture level.",
    "Based on the weather forecast, you should water your crops tomorrow.",
    "Your crops appear to be growing healthy!",
    "Consider applying fertilizer in the next few days.",
];

/// Delay before the assistant answers a message.
pub const REPLY_DELAY: Duration = Duration::from_secs(1);

/// Farm assistant with a fixed set of answers.
pub struct ChatBot {
    rng: StdRng,
    /// Submit times of messages still waiting for an answer, oldest first.
    pending: VecDeque<Instant>,
}

impl ChatBot {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            pending: VecDeque::new(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            pending: VecDeque::new(),
        }
    }

    /// Accepts a user message and schedules a reply. Blank input is ignored.
    pub fn submit(&mut self, text: &str, now: Instant) -> Option<ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.pending.push_back(now);
        Some(ChatMessage::new(Sender::User, text))
    }

    pub fn is_typing(&self) -> bool {
        !self.pending.is_empty()
    }

    /// The next scheduled reply, once `REPLY_DELAY` has passed for the
    /// oldest unanswered message. Each submitted message gets its own reply.
    pub fn poll_reply(&mut self, now: Instant) -> Option<ChatMessage> {
        let since = *self.pending.front()?;
        if now.saturating_duration_since(since) < REPLY_DELAY {
            return None;
        }
        self.pending.pop_front();
        Some(ChatMessage::new(Sender::Bot, self.pick_response()))
    }

    fn pick_response(&mut self) -> &'static str {
        RESPONSES[self.rng.random_range(0..RESPONSES.len())]
    }
}

impl Default for ChatBot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_messages_are_ignored() {
        let mut bot = ChatBot::seeded(1);
        assert!(bot.submit("   ", Instant::now()).is_none());
        assert!(!bot.is_typing());
    }

    #[test]
    fn reply_arrives_after_delay() {
        let mut bot = ChatBot::seeded(1);
        let start = Instant::now();
        let msg = bot.submit(" When should I water? ", start).unwrap();
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.body, "When should I water?");
        assert!(bot.is_typing());

        assert!(bot.poll_reply(start + Duration::from_millis(500)).is_none());

        let reply = bot.poll_reply(start + REPLY_DELAY).unwrap();
        assert_eq!(reply.sender, Sender::Bot);
        assert!(RESPONSES.contains(&reply.body.as_str()));
        assert!(!bot.is_typing());
        assert!(bot.poll_reply(start + REPLY_DELAY * 2).is_none());
    }

    #[test]
    fn every_message_gets_its_own_reply() {
        let mut bot = ChatBot::seeded(3);
        let start = Instant::now();
        bot.submit("first", start).unwrap();
        bot.submit("second", start + Duration::from_millis(500)).unwrap();

        let mut replies = 0;
        for step in 0..=50 {
            if bot.poll_reply(start + Duration::from_millis(step * 100)).is_some() {
                replies += 1;
            }
        }
        assert_eq!(replies, 2);
        assert!(!bot.is_typing());
    }

    #[test]
    fn second_reply_waits_for_its_own_delay() {
        let mut bot = ChatBot::seeded(3);
        let start = Instant::now();
        bot.submit("first", start).unwrap();
        bot.submit("second", start + Duration::from_millis(500)).unwrap();

        assert!(bot.poll_reply(start + REPLY_DELAY).is_some());
        assert!(bot.is_typing());
        assert!(bot.poll_reply(start + REPLY_DELAY).is_none());
        assert!(bot.poll_reply(start + Duration::from_millis(1500)).is_some());
        assert!(!bot.is_typing());
    }

    #[test]
    fn responses_come_from_canned_set() {
        let mut bot = ChatBot::seeded(5);
        for _ in 0..50 {
            assert!(RESPONSES.contains(&bot.pick_response()));
        }
    }
}
