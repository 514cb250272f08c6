use chrono::Utc;
use student_store::{
    cart::{
        Cart, CartError, ProductId, Quantity, add_to_cart, cart_lines, cart_subtotal,
        get_quantity_of_item_in_cart, get_total_items_in_cart, remove_from_cart,
    },
    models::Product,
};
use uuid::Uuid;

fn pid() -> ProductId {
    ProductId::new(Uuid::new_v4())
}

fn product(name: &str, price: i64) -> Product {
    Product {
        id: pid(),
        name: name.into(),
        category: "food".into(),
        description: None,
        image_url: None,
        price,
        created_at: Utc::now(),
    }
}

#[test]
fn add_increments_by_one_and_leaves_input_untouched() {
    let p = pid();
    let empty = Cart::new();
    let one = add_to_cart(&empty, p);
    let two = add_to_cart(&one, p);

    assert!(empty.is_empty());
    assert_eq!(get_quantity_of_item_in_cart(&one, p), 1);
    assert_eq!(get_quantity_of_item_in_cart(&two, p), 2);
}

#[test]
fn add_then_add_then_remove_scenario() {
    let p1 = pid();
    let cart = add_to_cart(&Cart::new(), p1);
    assert_eq!(cart, Cart::from_entries([(p1, 1)]).unwrap());
    let cart = add_to_cart(&cart, p1);
    assert_eq!(cart, Cart::from_entries([(p1, 2)]).unwrap());
    let cart = remove_from_cart(&cart, p1);
    assert_eq!(cart, Cart::from_entries([(p1, 1)]).unwrap());
}

#[test]
fn remove_then_add_restores_quantity() {
    let p = pid();
    let other = pid();
    let cart = Cart::from_entries([(p, 3), (other, 1)]).unwrap();
    let round_trip = add_to_cart(&remove_from_cart(&cart, p), p);
    assert_eq!(round_trip, cart);
}

#[test]
fn removing_last_unit_deletes_key_and_further_removes_are_noops() {
    let p = pid();
    let cart = add_to_cart(&Cart::new(), p);
    let emptied = remove_from_cart(&cart, p);

    assert!(emptied.get(&p).is_none());
    assert!(emptied.is_empty());
    assert_eq!(get_quantity_of_item_in_cart(&emptied, p), 0);
    assert_eq!(remove_from_cart(&emptied, p), emptied);
}

#[test]
fn removing_absent_item_returns_equivalent_cart() {
    let kept = pid();
    let cart = Cart::from_entries([(kept, 2)]).unwrap();
    assert_eq!(remove_from_cart(&cart, pid()), cart);
}

#[test]
fn total_tracks_sum_over_mixed_operations() {
    let ids: Vec<ProductId> = (0..4).map(|_| pid()).collect();
    let mut cart = Cart::new();
    let mut expected: i64 = 0;

    for step in 0..40usize {
        let id = ids[step % ids.len()];
        if step % 3 == 2 {
            if get_quantity_of_item_in_cart(&cart, id) > 0 {
                expected -= 1;
            }
            cart = remove_from_cart(&cart, id);
        } else {
            cart = add_to_cart(&cart, id);
            expected += 1;
        }
        let summed: i64 = cart.iter().map(|(_, q)| i64::from(q.get())).sum();
        assert_eq!(get_total_items_in_cart(&cart), summed);
        assert_eq!(get_total_items_in_cart(&cart), expected);
        assert!(cart.iter().all(|(_, q)| q.get() > 0));
    }
}

#[test]
fn products_work_as_cart_items() {
    let hoodie = product("Hoodie", 3999);
    let cart = add_to_cart(&add_to_cart(&Cart::new(), &hoodie), &hoodie);
    assert_eq!(get_quantity_of_item_in_cart(&cart, &hoodie), 2);
    assert_eq!(get_quantity_of_item_in_cart(&cart, hoodie.id), 2);
}

#[test]
fn quantity_rejects_non_positive_values() {
    assert_eq!(Quantity::new(0), Err(CartError::InvalidQuantity(0)));
    assert_eq!(Quantity::new(-3), Err(CartError::InvalidQuantity(-3)));
    assert_eq!(Quantity::new(5).map(|q| q.get()), Ok(5));
    assert!(Cart::from_entries([(pid(), 0)]).is_err());
}

#[test]
fn from_entries_sums_repeated_ids() {
    let p = pid();
    let cart = Cart::from_entries([(p, 2), (p, 3)]).unwrap();
    assert_eq!(get_quantity_of_item_in_cart(&cart, p), 5);
}

#[test]
fn cart_deserializes_from_id_to_quantity_object() {
    let p1 = pid();
    let p2 = pid();
    let json = format!(r#"{{"{p1}": 2, "{p2}": 1}}"#);
    let cart: Cart = serde_json::from_str(&json).unwrap();
    assert_eq!(get_quantity_of_item_in_cart(&cart, p1), 2);
    assert_eq!(get_quantity_of_item_in_cart(&cart, p2), 1);

    let back = serde_json::to_value(&cart).unwrap();
    assert_eq!(back[p1.to_string()], 2);
}

#[test]
fn cart_rejects_zero_quantity_and_bad_ids_when_deserializing() {
    let zero = format!(r#"{{"{}": 0}}"#, pid());
    assert!(serde_json::from_str::<Cart>(&zero).is_err());
    assert!(serde_json::from_str::<Cart>(r#"{"p1": 1}"#).is_err());
    assert!("not-a-uuid".parse::<ProductId>().is_err());
}

#[test]
fn cart_lines_price_known_products_and_skip_unknown() {
    let mug = product("Mug", 1200);
    let pen = product("Pen", 150);
    let cart = Cart::from_entries([(mug.id, 2), (pen.id, 3), (pid(), 1)]).unwrap();

    let lines = cart_lines(&cart, &[mug.clone(), pen.clone()]);
    assert_eq!(lines.len(), 2);
    let mug_line = lines.iter().find(|l| l.product_id == mug.id).unwrap();
    assert_eq!(mug_line.line_total, 2400);
    assert_eq!(cart_subtotal(&lines), 2400 + 450);
}
