//! Integration tests for the storefront state layer.
//!
//! These tests drive the public API the way a view layer would: subscribe
//! to bus events, hand intents to the storefront, and check that every
//! change is observed before the call returns.

use std::cell::RefCell;
use std::rc::Rc;

use domain::{
    BusEvent, Category, CheckoutState, DomainError, FormErrors, Intent, OrderField, OrderReceipt,
    PaymentMethod, Price, Product, ProductData, ProductId, ShopEvent, ShopEventKind, Storefront,
};

/// Products shaped like the ones the backend serves.
fn backend_products() -> Vec<ProductData> {
    vec![
        Product::builder(
            "854cef69-976d-4c2a-a18c-2aa45046c390",
            "+1 час в сутках",
            Category::SoftSkill,
        )
        .description("Если планируете решать задачи в тренажёре, берите два.")
        .image("/5_Dots.svg")
        .price(100)
        .build(),
        Product::builder(
            "c101ab44-ed99-4a54-990d-47aa2bb4e7d9",
            "HEX-леденец",
            Category::Other,
        )
        .image("/Shell.svg")
        .price(250)
        .build(),
        Product::builder(
            "b06cde61-912f-4663-9751-09956c0eed67",
            "Мамка-таймер",
            Category::Other,
        )
        .image("/Asterisk_2.svg")
        .build(),
    ]
}

fn id(n: usize) -> ProductId {
    backend_products()[n].id.clone()
}

/// Records every event name the bus delivers.
fn record_events(shop: &Storefront) -> Rc<RefCell<Vec<&'static str>>> {
    let names = Rc::new(RefCell::new(Vec::new()));
    let n = Rc::clone(&names);
    shop.bus()
        .subscribe_all(move |event| n.borrow_mut().push(event.name()));
    names
}

mod catalog_and_basket {
    use super::*;

    #[test]
    fn loading_the_catalog_notifies_the_page() {
        let mut shop = Storefront::new();
        let rendered = Rc::new(RefCell::new(Vec::new()));

        let r = Rc::clone(&rendered);
        shop.bus()
            .subscribe(ShopEventKind::ItemsChanged, move |event| {
                if let ShopEvent::ItemsChanged(data) = event {
                    *r.borrow_mut() = data
                        .products
                        .iter()
                        .map(|p| p.title().to_string())
                        .collect();
                }
            });

        shop.set_products(backend_products());

        assert_eq!(
            *rendered.borrow(),
            vec!["+1 час в сутках", "HEX-леденец", "Мамка-таймер"]
        );
    }

    #[test]
    fn basket_total_scenario() {
        let mut shop = Storefront::new();
        shop.set_products(backend_products());

        shop.add_to_basket(&id(0)).unwrap();
        shop.add_to_basket(&id(1)).unwrap();
        assert_eq!(shop.basket().total(), Some(Price::new(350)));

        shop.remove_from_basket(&id(0));
        assert_eq!(shop.basket().total(), Some(Price::new(250)));
    }

    #[test]
    fn page_counter_follows_basket_changes() {
        let mut shop = Storefront::new();
        shop.set_products(backend_products());
        let counter = Rc::new(RefCell::new(0usize));

        let c = Rc::clone(&counter);
        shop.bus()
            .subscribe(ShopEventKind::BasketChanged, move |event| {
                if let ShopEvent::BasketChanged(data) = event {
                    *c.borrow_mut() = data.products.len();
                }
            });

        shop.handle(Intent::ToggleBasket(id(0))).unwrap();
        assert_eq!(*counter.borrow(), 1);

        shop.handle(Intent::ToggleBasket(id(1))).unwrap();
        assert_eq!(*counter.borrow(), 2);

        shop.handle(Intent::ToggleBasket(id(0))).unwrap();
        assert_eq!(*counter.borrow(), 1);
    }

    #[test]
    fn membership_flag_is_visible_from_the_catalog() {
        let mut shop = Storefront::new();
        shop.set_products(backend_products());

        shop.add_to_basket(&id(1)).unwrap();

        let flags: Vec<bool> = shop
            .catalog()
            .products()
            .iter()
            .map(|p| p.in_basket())
            .collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn priceless_product_stays_out_of_the_basket() {
        let mut shop = Storefront::new();
        shop.set_products(backend_products());

        let err = shop.handle(Intent::ToggleBasket(id(2))).unwrap_err();

        assert!(matches!(err, DomainError::NotPurchasable { .. }));
        assert!(shop.basket().is_empty());
    }
}

mod checkout {
    use super::*;

    fn in_checkout() -> Storefront {
        let mut shop = Storefront::new();
        shop.set_products(backend_products());
        shop.add_to_basket(&id(0)).unwrap();
        shop.add_to_basket(&id(1)).unwrap();
        shop.proceed_to_checkout().unwrap();
        shop
    }

    /// Mirrors the delivery form: enabled iff the last errors were empty.
    fn watch_form(shop: &Storefront, kind: ShopEventKind) -> Rc<RefCell<Vec<FormErrors>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        shop.bus().subscribe(kind, move |event| match event {
            ShopEvent::DeliveryDetailsErrorsChanged(errors)
            | ShopEvent::ContactsErrorsChanged(errors) => s.borrow_mut().push(errors.clone()),
            _ => {}
        });
        seen
    }

    #[test]
    fn delivery_form_scenario() {
        let mut shop = in_checkout();
        let seen = watch_form(&shop, ShopEventKind::DeliveryDetailsErrorsChanged);

        shop.set_address("");
        {
            let seen = seen.borrow();
            let last = seen.last().unwrap();
            assert!(last.contains(OrderField::Payment));
            assert!(last.contains(OrderField::Address));
        }

        assert!(!shop.set_payment(PaymentMethod::Online));
        {
            let seen = seen.borrow();
            let last = seen.last().unwrap();
            assert_eq!(last.fields().collect::<Vec<_>>(), vec![OrderField::Address]);
            assert_eq!(last.to_string(), "Enter an address");
        }

        assert!(shop.set_address("Санкт-Петербург, Невский 1"));
        assert!(seen.borrow().last().unwrap().is_empty());
        assert_eq!(shop.order().state(), CheckoutState::DeliveryValid);
    }

    #[test]
    fn contacts_form_scenario() {
        let mut shop = in_checkout();
        shop.set_payment(PaymentMethod::Online);
        shop.set_address("Kazan");
        let seen = watch_form(&shop, ShopEventKind::ContactsErrorsChanged);

        assert!(!shop.set_email("not-an-email"));
        assert!(shop.order().errors().contains(OrderField::Email));

        shop.set_email("a@b.com");
        assert!(shop.set_phone("+7 912 345 6789"));

        assert!(shop.order().errors().is_empty());
        assert_eq!(seen.borrow().len(), 3);
        assert_eq!(shop.order().state(), CheckoutState::ContactsValid);
    }

    #[test]
    fn events_are_observed_before_the_call_returns() {
        let mut shop = in_checkout();
        let valid = Rc::new(RefCell::new(None));

        let v = Rc::clone(&valid);
        shop.bus()
            .subscribe(ShopEventKind::DeliveryDetailsErrorsChanged, move |event| {
                if let ShopEvent::DeliveryDetailsErrorsChanged(errors) = event {
                    *v.borrow_mut() = Some(errors.is_empty());
                }
            });

        shop.set_payment(PaymentMethod::OnDelivery);
        assert_eq!(*valid.borrow(), Some(false));

        shop.set_address("Kazan");
        assert_eq!(*valid.borrow(), Some(true));
    }

    #[test]
    fn handler_can_react_with_a_nested_publish() {
        let mut shop = in_checkout();
        let names = record_events(&shop);

        let bus = shop.bus().clone();
        shop.bus()
            .subscribe(ShopEventKind::DeliveryDetailsErrorsChanged, move |event| {
                if let ShopEvent::DeliveryDetailsErrorsChanged(errors) = event
                    && errors.is_empty()
                {
                    bus.publish(ShopEvent::ContactsErrorsChanged(FormErrors::default()));
                }
            });

        shop.set_payment(PaymentMethod::Online);
        shop.set_address("Kazan");

        // The nested event is delivered inside the outer dispatch, after the
        // wildcard recorder already saw the outer one.
        assert_eq!(
            *names.borrow(),
            vec![
                "deliveryDetailsErrors:change",
                "deliveryDetailsErrors:change",
                "contactsErrors:change",
            ]
        );
    }

    #[test]
    fn successful_submission_resets_basket_and_order() {
        let mut shop = in_checkout();
        shop.set_payment(PaymentMethod::Online);
        shop.set_address("Kazan");
        shop.set_email("a@b.com");
        shop.set_phone("89123456789");
        let names = record_events(&shop);

        let submission = shop.order_submission().unwrap();
        shop.complete_order(OrderReceipt {
            id: "28c57cb4".to_string(),
            total: submission.total,
        });

        assert_eq!(*names.borrow(), vec!["order:completed", "basket:changed"]);
        assert!(shop.basket().is_empty());
        assert_eq!(shop.basket().total(), None);

        let order = shop.order();
        assert!(order.items().is_empty());
        assert_eq!(order.total(), None);
        assert_eq!(order.payment(), None);
        assert_eq!(order.address(), "");
        assert_eq!(order.email(), "");
        assert_eq!(order.phone(), "");
        assert!(!order.is_valid());
        assert!(order.errors().is_empty());
        assert_eq!(order.state(), CheckoutState::Uninitialized);
    }

    #[test]
    fn forms_filled_in_any_order_can_be_submitted() {
        let mut shop = in_checkout();

        for intent in [
            Intent::Email("a@b.com".to_string()),
            Intent::Phone("+7 912 345 6789".to_string()),
            Intent::Address("Kazan".to_string()),
            Intent::Payment(PaymentMethod::OnDelivery),
        ] {
            shop.handle(intent).unwrap();
        }

        assert_eq!(shop.order().state(), CheckoutState::ContactsValid);
        let submission = shop.order_submission().unwrap();
        shop.complete_order(OrderReceipt {
            id: "a1".to_string(),
            total: submission.total,
        });
        assert!(shop.basket().is_empty());
        assert_eq!(shop.order().state(), CheckoutState::Uninitialized);
    }

    #[test]
    fn re_edited_delivery_keeps_the_order_submittable() {
        let mut shop = in_checkout();
        shop.set_payment(PaymentMethod::Online);
        shop.set_address("Kazan");
        shop.set_email("a@b.com");
        shop.set_phone("89123456789");

        shop.set_payment(PaymentMethod::OnDelivery);
        assert!(shop.order_submission().is_ok());

        shop.set_address("   ");
        assert!(shop.order_submission().is_err());
        assert_eq!(shop.order().state(), CheckoutState::DeliveryPending);

        shop.set_address("Moscow");
        let submission = shop.order_submission().unwrap();
        assert_eq!(submission.address, "Moscow");
        assert_eq!(submission.payment, PaymentMethod::OnDelivery);
    }

    #[test]
    fn leaving_and_reentering_checkout_keeps_typed_details() {
        let mut shop = in_checkout();
        shop.set_payment(PaymentMethod::Online);
        shop.set_address("Kazan");
        shop.set_email("a@b.com");
        shop.set_phone("89123456789");

        shop.clear_basket();
        assert_eq!(shop.order().state(), CheckoutState::Uninitialized);

        shop.add_to_basket(&id(1)).unwrap();
        shop.proceed_to_checkout().unwrap();

        assert_eq!(shop.order().state(), CheckoutState::ContactsValid);
        let submission = shop.order_submission().unwrap();
        assert_eq!(submission.items, vec![id(1)]);
        assert_eq!(submission.total, Price::new(250));
    }

    #[test]
    fn submitted_order_matches_the_basket_after_edits() {
        let mut shop = in_checkout();
        shop.handle(Intent::RemoveFromBasket(id(0))).unwrap();
        shop.set_payment(PaymentMethod::Online);
        shop.set_address("Kazan");
        shop.set_email("a@b.com");
        shop.set_phone("89123456789");

        let submission = shop.order_submission().unwrap();

        assert_eq!(submission.items, shop.basket().items());
        assert_eq!(Some(submission.total), shop.basket().total());
    }

    #[test]
    fn invalid_order_cannot_be_submitted() {
        let mut shop = in_checkout();
        shop.set_payment(PaymentMethod::Online);

        let err = shop.order_submission().unwrap_err();

        assert!(matches!(err, DomainError::Order(_)));
        assert_eq!(shop.basket().len(), 2);
    }

    #[test]
    fn checkout_started_carries_basket_summary() {
        let mut shop = Storefront::new();
        shop.set_products(backend_products());
        shop.add_to_basket(&id(0)).unwrap();
        let started = Rc::new(RefCell::new(None));

        let s = Rc::clone(&started);
        shop.bus()
            .subscribe(ShopEventKind::CheckoutStarted, move |event| {
                if let ShopEvent::CheckoutStarted(data) = event {
                    *s.borrow_mut() = Some((data.item_count, data.total));
                }
            });

        shop.handle(Intent::Checkout).unwrap();

        assert_eq!(*started.borrow(), Some((1, Some(Price::new(100)))));
    }
}
