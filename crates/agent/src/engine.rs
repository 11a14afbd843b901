//! Dialogue engine
//!
//! Drives one conversational turn: normalize, classify, then route through
//! the flow state machine. The engine is immutable shared state; everything
//! that changes lives in the `ConversationSession` handed to `handle_turn`.
//!
//! Turn routing priority:
//! 1. Awaiting-confirmation state (confirm / cancel / re-prompt)
//! 2. Awaiting-more state (continue / check out)
//! 3. Greeting with a non-empty cart (existing-cart handling)
//! 4. Existing-cart state resolution
//! 5. Bare quantity answering a pending "how many?" question
//! 6. Generic intents (greeting, menu, cart, thanks, ...)
//! 7. Menu-item extraction into the cart
//! 8. Knowledge-base fallback, then the catch-all reply

use std::sync::Arc;

use order_agent_catalog::MenuCatalog;
use order_agent_config::AgentSettings;
use order_agent_core::{Cart, ConversationSession, FlowState, Reply, ReplyHint, UserIntent};
use order_agent_knowledge::KnowledgeBase;
use order_agent_persistence::OrderStore;
use order_agent_text_processing::{parse_quantity, Normalizer};

use crate::classifier::IntentClassifier;
use crate::extractor::OrderExtractor;

/// Engine tuning, typically derived from `AgentSettings`
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Intent acceptance threshold on the 0-100 fuzzy scale
    pub intent_threshold: f32,
    /// Fuzzy menu-item match threshold on the 0-100 scale
    pub fuzzy_item_threshold: f32,
    /// Knowledge acceptance threshold on the 0-1 cosine scale
    pub knowledge_threshold: f32,
    /// Topic consulted for fallback answers
    pub knowledge_topic: String,
    /// Whole-token rewrites applied during normalization
    pub rewrites: Vec<(String, String)>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_settings(&AgentSettings::default())
    }
}

impl EngineConfig {
    pub fn from_settings(settings: &AgentSettings) -> Self {
        Self {
            intent_threshold: settings.intent_threshold,
            fuzzy_item_threshold: settings.fuzzy_item_threshold,
            knowledge_threshold: settings.knowledge_threshold,
            knowledge_topic: settings.knowledge_topic.clone(),
            rewrites: settings
                .rewrites
                .iter()
                .map(|(from, to)| (from.clone(), to.clone()))
                .collect(),
        }
    }
}

/// Synchronous, per-turn dialogue engine
pub struct DialogueEngine {
    normalizer: Normalizer,
    classifier: IntentClassifier,
    extractor: OrderExtractor,
    catalog: MenuCatalog,
    knowledge: KnowledgeBase,
    orders: Arc<dyn OrderStore>,
    knowledge_threshold: f32,
    knowledge_topic: String,
}

impl DialogueEngine {
    pub fn new(
        config: EngineConfig,
        catalog: MenuCatalog,
        knowledge: KnowledgeBase,
        orders: Arc<dyn OrderStore>,
    ) -> Self {
        Self {
            normalizer: Normalizer::with_rewrites(config.rewrites),
            classifier: IntentClassifier::new(config.intent_threshold),
            extractor: OrderExtractor::new(config.fuzzy_item_threshold),
            catalog,
            knowledge,
            orders,
            knowledge_threshold: config.knowledge_threshold,
            knowledge_topic: config.knowledge_topic,
        }
    }

    /// Handle one user turn against one session.
    pub fn handle_turn(&self, session: &mut ConversationSession, input: &str) -> Reply {
        let text = self.normalizer.normalize(input);
        let intent = self.classifier.classify(&text);

        tracing::info!(
            session_id = %session.session_id,
            state = session.state.display_name(),
            intent = intent.display_name(),
            "Turn"
        );

        if session.state == FlowState::AwaitingConfirmation {
            return self.resolve_confirmation(session, intent);
        }

        if session.state == FlowState::AwaitingMore {
            match intent {
                UserIntent::AddMore => {
                    session.state = FlowState::Idle;
                    session.mark_dirty();
                    return Reply::text("Great! What else would you like?");
                }
                UserIntent::Cancel => {
                    session.state = FlowState::AwaitingConfirmation;
                    session.mark_dirty();
                    let text = format!(
                        "Here is your order:\n{}\nShall I place the order?",
                        render_cart_summary(&session.cart)
                    );
                    return Reply::with_hint(text, ReplyHint::ShowConfirmation);
                }
                // Anything else falls through; more items or a question
                // are both valid while the basket is open.
                _ => {}
            }
        }

        if intent == UserIntent::Greeting && !session.cart.is_empty() {
            session.state = FlowState::HandlingExistingCart;
            session.mark_dirty();
            let text = format!(
                "Welcome back! You already have items in your basket:\n{}\nWould you like to continue this order, or clear it and start fresh?",
                render_cart_summary(&session.cart)
            );
            return Reply::with_hint(text, ReplyHint::ShowCart);
        }

        if session.state == FlowState::HandlingExistingCart {
            if intent == UserIntent::Cancel {
                session.reset_order();
                return Reply::text("Your basket has been cleared. What would you like to order?");
            }
            // Any other input resumes the order and is handled normally below
            session.state = FlowState::Idle;
            session.mark_dirty();
            if intent == UserIntent::AddMore {
                let text = format!(
                    "Resuming your order:\n{}\nWhat would you like to add?",
                    render_cart_summary(&session.cart)
                );
                return Reply::with_hint(text, ReplyHint::ShowCart);
            }
        }

        if let Some(reply) = self.resolve_pending_quantity(session, &text) {
            return reply;
        }

        if let Some(reply) = self.resolve_generic_intent(session, intent) {
            return reply;
        }

        if let Some(reply) = self.resolve_order_items(session, &text) {
            return reply;
        }

        if let Some(hit) = self.knowledge.query(&self.knowledge_topic, &text) {
            if hit.score > self.knowledge_threshold {
                tracing::debug!(score = hit.score, "Knowledge answer accepted");
                return Reply::text(hit.answer);
            }
            tracing::debug!(score = hit.score, "Knowledge answer below threshold");
        }

        Reply::text(
            "Sorry, I didn't understand that. You can ask for the menu, order items by name, or say 'cart' to review your order.",
        )
    }

    /// Confirm-or-cancel resolution; anything else re-prompts.
    fn resolve_confirmation(&self, session: &mut ConversationSession, intent: UserIntent) -> Reply {
        match intent {
            UserIntent::Confirm => self.confirm_order(session),
            UserIntent::Cancel => {
                session.reset_order();
                Reply::text("Order cancelled. Your basket is empty now. Can I help with anything else?")
            }
            _ => {
                let text = format!(
                    "Your order is waiting for confirmation:\n{}\nPlease say 'confirm' to place it or 'cancel' to discard it.",
                    render_cart_summary(&session.cart)
                );
                Reply::with_hint(text, ReplyHint::ShowConfirmation)
            }
        }
    }

    /// Persist the cart; on failure keep everything so the user can retry.
    fn confirm_order(&self, session: &mut ConversationSession) -> Reply {
        match self.orders.record(session.user_id(), &session.cart) {
            Ok(()) => {
                let total = session.cart.grand_total();
                session.reset_order();
                Reply::text(format!(
                    "Order confirmed! Your total is Rs.{total}. Delivery in 30-45 minutes. Thank you for ordering with us!"
                ))
            }
            Err(e) => {
                tracing::error!(
                    session_id = %session.session_id,
                    error = %e,
                    "Could not record order, keeping cart for retry"
                );
                Reply::with_hint(
                    "Something went wrong while placing your order. Your basket is untouched, please try confirming again.",
                    ReplyHint::ShowConfirmation,
                )
            }
        }
    }

    /// A bare number answering an earlier "how many?" question.
    fn resolve_pending_quantity(
        &self,
        session: &mut ConversationSession,
        text: &str,
    ) -> Option<Reply> {
        let pending = session.pending_item.clone()?;

        let mut tokens = text.split_whitespace();
        let quantity = match (tokens.next().and_then(parse_quantity), tokens.next()) {
            (Some(q), None) => q,
            _ => return None,
        };

        let price = self.catalog.price_of(&pending)?;
        session.cart.add(&pending, quantity, price);
        session.pending_item = None;
        session.state = FlowState::AwaitingMore;
        session.mark_dirty();

        Some(Reply::text(format!(
            "Added {quantity} x {} to your basket. Would you like anything else?",
            title_case(&pending)
        )))
    }

    fn resolve_generic_intent(
        &self,
        session: &mut ConversationSession,
        intent: UserIntent,
    ) -> Option<Reply> {
        let reply = match intent {
            UserIntent::Greeting => Reply::text(
                "Hello! Welcome to our restaurant. You can ask for the menu or tell me what you'd like to order.",
            ),
            UserIntent::MenuRequest => {
                if self.catalog.is_empty() {
                    Reply::text("Sorry, the menu is unavailable right now. Please try again later.")
                } else {
                    Reply::with_hint(render_menu(&self.catalog), ReplyHint::ShowMenu)
                }
            }
            UserIntent::ViewCart => {
                if session.cart.is_empty() {
                    Reply::text("Your basket is empty. Ask for the menu to get started!")
                } else {
                    session.state = FlowState::AwaitingMore;
                    session.mark_dirty();
                    let text = format!(
                        "Here is your basket:\n{}\nWould you like to add anything else?",
                        render_cart_summary(&session.cart)
                    );
                    Reply::with_hint(text, ReplyHint::ShowCart)
                }
            }
            UserIntent::Confirm => {
                if session.cart.is_empty() {
                    Reply::text("Your basket is empty, there is nothing to confirm yet.")
                } else {
                    session.state = FlowState::AwaitingConfirmation;
                    session.mark_dirty();
                    let text = format!(
                        "Here is your order:\n{}\nShall I place the order?",
                        render_cart_summary(&session.cart)
                    );
                    Reply::with_hint(text, ReplyHint::ShowConfirmation)
                }
            }
            UserIntent::Cancel => {
                if session.cart.is_empty() {
                    Reply::text("No problem. Ask me for the menu whenever you're ready.")
                } else {
                    session.state = FlowState::AwaitingConfirmation;
                    session.mark_dirty();
                    let text = format!(
                        "Here is your order:\n{}\nShall I place the order?",
                        render_cart_summary(&session.cart)
                    );
                    Reply::with_hint(text, ReplyHint::ShowConfirmation)
                }
            }
            UserIntent::AddMore => Reply::text("Sure! What would you like to add?"),
            UserIntent::Thanks => {
                if session.cart.is_empty() {
                    Reply::text("You're welcome! Have a great day.")
                } else {
                    Reply::text(
                        "You're welcome! Your basket is still open, say 'confirm' whenever you're ready.",
                    )
                }
            }
            UserIntent::None => return None,
        };

        Some(reply)
    }

    /// Extract menu mentions from the turn and fold them into the cart.
    fn resolve_order_items(&self, session: &mut ConversationSession, text: &str) -> Option<Reply> {
        let items = self.extractor.extract(text, &self.catalog);
        if items.is_empty() {
            return None;
        }

        // A lone bare item mention asks for a quantity instead of assuming 1
        if items.len() == 1 && !items[0].explicit_quantity && text == items[0].item {
            let item = items[0].item.clone();
            let price = self.catalog.price_of(&item)?;
            session.pending_item = Some(item.clone());
            session.mark_dirty();
            return Some(Reply::text(format!(
                "A {} costs Rs.{price}. How many would you like?",
                title_case(&item)
            )));
        }

        let mut added = Vec::with_capacity(items.len());
        for entry in &items {
            if let Some(price) = self.catalog.price_of(&entry.item) {
                session.cart.add(&entry.item, entry.quantity, price);
                added.push(format!("{} x {}", entry.quantity, title_case(&entry.item)));
            }
        }

        if added.is_empty() {
            return None;
        }

        session.pending_item = None;
        session.state = FlowState::AwaitingMore;
        session.mark_dirty();

        Some(Reply::text(format!(
            "Added {} to your basket. Would you like anything else?",
            added.join(", ")
        )))
    }
}

/// Render the cart as one bulleted line per item plus the grand total.
pub fn render_cart_summary(cart: &Cart) -> String {
    let mut out = String::new();
    for line in cart.lines() {
        out.push_str(&format!(
            "- {} x {} = Rs.{}\n",
            line.quantity,
            title_case(&line.item),
            line.line_total
        ));
    }
    out.push_str(&format!("Total: Rs.{}", cart.grand_total()));
    out
}

/// Render the full menu grouped by category.
fn render_menu(catalog: &MenuCatalog) -> String {
    let mut out = String::from("Here is our menu:\n");
    let mut current_category: Option<&str> = None;

    for (category, name, price) in catalog.iter_flat() {
        if current_category != Some(category) {
            out.push_str(&format!("\n{}:\n", title_case(category)));
            current_category = Some(category);
        }
        out.push_str(&format!("- {} - Rs.{}\n", title_case(name), price));
    }

    out.push_str("\nWhat would you like to order?");
    out
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_agent_persistence::{FailingOrderStore, InMemoryOrderStore};

    fn catalog() -> MenuCatalog {
        MenuCatalog::from_categories(vec![
            (
                "mains".to_string(),
                vec![("burger".to_string(), 200), ("pizza".to_string(), 350)],
            ),
            ("drinks".to_string(), vec![("coke".to_string(), 60)]),
        ])
    }

    fn engine_with(store: Arc<dyn OrderStore>) -> DialogueEngine {
        let mut kb = KnowledgeBase::new();
        kb.insert_topic(
            "faq",
            vec![(
                "what is the delivery charge".to_string(),
                "Delivery is free for orders above Rs.500.".to_string(),
            )],
        );
        DialogueEngine::new(EngineConfig::default(), catalog(), kb, store)
    }

    fn engine() -> DialogueEngine {
        engine_with(Arc::new(InMemoryOrderStore::new()))
    }

    #[test]
    fn test_cart_summary_rendering() {
        let mut cart = Cart::new();
        cart.add("burger", 2, 200);
        cart.add("coke", 1, 60);

        let summary = render_cart_summary(&cart);
        assert!(summary.contains("2 x Burger = Rs.400"));
        assert!(summary.contains("1 x Coke = Rs.60"));
        assert!(summary.contains("Total: Rs.460"));
    }

    #[test]
    fn test_menu_rendering_groups_categories() {
        let menu = render_menu(&catalog());
        assert!(menu.contains("Mains:"));
        assert!(menu.contains("Drinks:"));
        assert!(menu.contains("- Pizza - Rs.350"));
    }

    #[test]
    fn test_greeting_reply() {
        let engine = engine();
        let mut session = ConversationSession::new("s-1");
        let reply = engine.handle_turn(&mut session, "Hello!");
        assert!(reply.text.contains("Welcome"));
        assert_eq!(session.state, FlowState::Idle);
    }

    #[test]
    fn test_order_then_checkout_then_confirm() {
        let store = Arc::new(InMemoryOrderStore::new());
        let engine = engine_with(store.clone());
        let mut session = ConversationSession::new("s-2");
        session.user_id = Some("u-9".to_string());

        let reply = engine.handle_turn(&mut session, "2 burger and 1 coke");
        assert!(reply.text.contains("2 x Burger"));
        assert_eq!(session.state, FlowState::AwaitingMore);
        assert_eq!(session.cart.grand_total(), 460);

        let reply = engine.handle_turn(&mut session, "no");
        assert_eq!(reply.hint, ReplyHint::ShowConfirmation);
        assert_eq!(session.state, FlowState::AwaitingConfirmation);

        let reply = engine.handle_turn(&mut session, "confirm");
        assert!(reply.text.contains("Order confirmed"));
        assert!(session.cart.is_empty());
        assert_eq!(session.state, FlowState::Idle);
        assert_eq!(store.records().len(), 2);
        assert_eq!(store.records()[0].user_id, "u-9");
    }

    #[test]
    fn test_persistence_failure_keeps_cart() {
        let engine = engine_with(Arc::new(FailingOrderStore));
        let mut session = ConversationSession::new("s-3");

        engine.handle_turn(&mut session, "1 pizza");
        engine.handle_turn(&mut session, "no");
        let reply = engine.handle_turn(&mut session, "confirm");

        assert!(reply.text.contains("try confirming again"));
        assert_eq!(session.state, FlowState::AwaitingConfirmation);
        assert_eq!(session.cart.grand_total(), 350);
    }

    #[test]
    fn test_bare_item_asks_for_quantity() {
        let engine = engine();
        let mut session = ConversationSession::new("s-4");

        let reply = engine.handle_turn(&mut session, "burger");
        assert!(reply.text.contains("How many"));
        assert_eq!(session.pending_item.as_deref(), Some("burger"));

        let reply = engine.handle_turn(&mut session, "3");
        assert!(reply.text.contains("3 x Burger"));
        assert_eq!(session.cart.lines()[0].quantity, 3);
        assert_eq!(session.state, FlowState::AwaitingMore);
        assert!(session.pending_item.is_none());
    }

    #[test]
    fn test_absurd_quantity_does_not_panic() {
        let engine = engine();
        let mut session = ConversationSession::new("s-16");

        let reply = engine.handle_turn(&mut session, "30000000 burger");
        assert!(reply.text.contains("1 x Burger"));
        assert_eq!(session.cart.lines()[0].quantity, 1);
        assert_eq!(session.cart.grand_total(), 200);
    }

    #[test]
    fn test_knowledge_fallback() {
        let engine = engine();
        let mut session = ConversationSession::new("s-5");
        let reply = engine.handle_turn(&mut session, "What is the delivery charge?");
        assert!(reply.text.contains("free for orders above"));
    }

    #[test]
    fn test_catch_all_reply() {
        let engine = engine();
        let mut session = ConversationSession::new("s-6");
        let reply = engine.handle_turn(&mut session, "qwerty asdfgh");
        assert!(reply.text.contains("didn't understand"));
    }

    #[test]
    fn test_greeting_with_existing_cart() {
        let engine = engine();
        let mut session = ConversationSession::new("s-7");
        session.cart.add("burger", 1, 200);

        let reply = engine.handle_turn(&mut session, "hello");
        assert!(reply.text.contains("already have items"));
        assert_eq!(session.state, FlowState::HandlingExistingCart);

        let reply = engine.handle_turn(&mut session, "clear");
        assert!(reply.text.contains("cleared"));
        assert!(session.cart.is_empty());
        assert_eq!(session.state, FlowState::Idle);
    }

    #[test]
    fn test_existing_cart_resume() {
        let engine = engine();
        let mut session = ConversationSession::new("s-8");
        session.cart.add("burger", 1, 200);
        session.state = FlowState::HandlingExistingCart;

        let reply = engine.handle_turn(&mut session, "yes");
        assert!(reply.text.contains("Resuming your order"));
        assert_eq!(session.state, FlowState::Idle);
        assert_eq!(session.cart.grand_total(), 200);
    }

    #[test]
    fn test_awaiting_more_add_more() {
        let engine = engine();
        let mut session = ConversationSession::new("s-9");
        engine.handle_turn(&mut session, "1 coke");
        assert_eq!(session.state, FlowState::AwaitingMore);

        let reply = engine.handle_turn(&mut session, "yes");
        assert!(reply.text.contains("What else"));
        assert_eq!(session.state, FlowState::Idle);
    }

    #[test]
    fn test_awaiting_more_accepts_direct_item() {
        let engine = engine();
        let mut session = ConversationSession::new("s-10");
        engine.handle_turn(&mut session, "1 coke");

        // More items without answering yes/no also works
        let reply = engine.handle_turn(&mut session, "2 pizza");
        assert!(reply.text.contains("2 x Pizza"));
        assert_eq!(session.cart.grand_total(), 760);
    }

    #[test]
    fn test_confirmation_reprompt() {
        let engine = engine();
        let mut session = ConversationSession::new("s-11");
        engine.handle_turn(&mut session, "1 burger");
        engine.handle_turn(&mut session, "done");
        assert_eq!(session.state, FlowState::AwaitingConfirmation);

        let reply = engine.handle_turn(&mut session, "what about dessert");
        assert!(reply.text.contains("confirmation"));
        assert_eq!(reply.hint, ReplyHint::ShowConfirmation);
        assert_eq!(session.state, FlowState::AwaitingConfirmation);
    }

    #[test]
    fn test_view_cart() {
        let engine = engine();
        let mut session = ConversationSession::new("s-12");
        let reply = engine.handle_turn(&mut session, "show cart");
        assert!(reply.text.contains("empty"));

        engine.handle_turn(&mut session, "1 burger");
        let reply = engine.handle_turn(&mut session, "show cart");
        assert!(reply.text.contains("1 x Burger"));
        assert_eq!(reply.hint, ReplyHint::ShowCart);
    }

    #[test]
    fn test_menu_request() {
        let engine = engine();
        let mut session = ConversationSession::new("s-13");
        let reply = engine.handle_turn(&mut session, "show me the menu");
        assert_eq!(reply.hint, ReplyHint::ShowMenu);
        assert!(reply.text.contains("Burger"));
    }

    #[test]
    fn test_empty_catalog_menu_request() {
        let kb = KnowledgeBase::new();
        let engine = DialogueEngine::new(
            EngineConfig::default(),
            MenuCatalog::new(),
            kb,
            Arc::new(InMemoryOrderStore::new()),
        );
        let mut session = ConversationSession::new("s-14");
        let reply = engine.handle_turn(&mut session, "menu");
        assert!(reply.text.contains("unavailable"));
    }
}
