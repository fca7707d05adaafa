mod common;

use common::*;

#[test]
fn initializer_sets_fields() {
    assert_prints(
        r#"
        class Foo {
          init() {
            this.value = "bar";
          }
        }
        print Foo().value;
        "#,
        "bar\n",
    );
}

#[test]
fn class_and_instance_display() {
    assert_prints(
        r#"
        class Bagel {}
        print Bagel;
        print Bagel();
        "#,
        "<class Bagel>\n<class Bagel instance>\n",
    );
}

#[test]
fn methods_bind_this() {
    assert_prints(
        r#"
        class Cake {
          taste() {
            var adjective = "delicious";
            print "The " + this.flavor + " cake is " + adjective + "!";
          }
        }
        var cake = Cake();
        cake.flavor = "German chocolate";
        cake.taste();
        "#,
        "The German chocolate cake is delicious!\n",
    );
}

#[test]
fn bound_method_remembers_its_instance() {
    assert_prints(
        r#"
        class Person {
          init(name) { this.name = name; }
          sayName() { print this.name; }
        }
        var jane = Person("Jane");
        var bill = Person("Bill");
        bill.sayName = jane.sayName;
        bill.sayName();
        print jane.sayName;
        "#,
        "Jane\n<fn sayName>\n",
    );
}

#[test]
fn fields_shadow_methods() {
    assert_prints(
        r#"
        class Box {
          get() { return "method"; }
        }
        var b = Box();
        print b.get();
        b.get = "field";
        print b.get;
        "#,
        "method\nfield\n",
    );
}

#[test]
fn set_evaluates_to_assigned_value() {
    assert_prints(
        r#"
        class P {}
        var p = P();
        print p.x = 3;
        print p.x;
        "#,
        "3\n3\n",
    );
}

#[test]
fn initializer_arity_is_the_class_arity() {
    assert_eq!(
        run("class P { init(a, b) {} }\nP(1);").stderr,
        "Expected 2 arguments but got 1.\n[line 2]\n"
    );
    assert_eq!(
        run("class Q {}\nQ(1);").stderr,
        "Expected 0 arguments but got 1.\n[line 2]\n"
    );
}

#[test]
fn calling_init_directly_returns_the_instance() {
    assert_prints(
        r#"
        class Foo {
          init() {
            this.count = 0;
            return;
          }
        }
        var foo = Foo();
        foo.count = 5;
        var again = foo.init();
        print again == foo;
        print foo.count;
        "#,
        "true\n0\n",
    );
}

#[test]
fn instances_compare_by_identity() {
    assert_prints(
        r#"
        class A {}
        var a = A();
        var b = a;
        print a == b;
        print a == A();
        print A == A;
        "#,
        "true\nfalse\ntrue\n",
    );
}

#[test]
fn inherited_methods() {
    assert_prints(
        r#"
        class Doughnut {
          cook() { print "Fry until golden brown."; }
        }
        class BostonCream < Doughnut {}
        BostonCream().cook();
        "#,
        "Fry until golden brown.\n",
    );
}

#[test]
fn super_calls_the_superclass_method() {
    assert_prints(
        r#"
        class A {
          method() { print "A"; }
        }
        class B < A {
          method() { print "B"; }
          test() { super.method(); }
        }
        class C < B {}
        C().test();
        "#,
        "A\n",
    );
}

#[test]
fn super_chains_through_several_levels() {
    assert_prints(
        r#"
        class Base {
          init(x) { this.x = x; }
          describe() { return "base " + this.x; }
        }
        class Middle < Base {
          init(x) { super.init(x * 2); }
          describe() { return "middle/" + super.describe(); }
        }
        class Top < Middle {
          describe() { return "top/" + super.describe(); }
        }
        print Top(4).describe();
        "#,
        "top/middle/base 8\n",
    );
}

#[test]
fn super_method_can_be_stored() {
    assert_prints(
        r#"
        class A { hi() { return "hi from " + this.name; } }
        class B < A {
          init() { this.name = "b"; }
          grab() { return super.hi; }
        }
        var f = B().grab();
        print f();
        "#,
        "hi from b\n",
    );
}

#[test]
fn undefined_property() {
    let outcome = run("class A {}\nA().missing;");
    assert_eq!(outcome.stderr, "Undefined property 'missing'.\n[line 2]\n");
    assert_eq!(outcome.exit_code, Some(70));
}

#[test]
fn undefined_super_method() {
    let outcome = run("class A {}\nclass B < A { go() { super.nope(); } }\nB().go();");
    assert_eq!(outcome.stderr, "Undefined property 'nope'.\n[line 2]\n");
}

#[test]
fn properties_only_on_instances() {
    assert_eq!(
        run("var x = 1;\nx.y;").stderr,
        "Only instances have properties.\n[line 2]\n"
    );
    assert_eq!(
        run("var x = \"s\";\nx.y = 2;").stderr,
        "Only instances have fields.\n[line 2]\n"
    );
}

#[test]
fn superclass_must_be_a_class() {
    let outcome = run("var NotAClass = \"nope\";\nclass Sub < NotAClass {}");
    assert_eq!(outcome.stderr, "Superclass must be a class.\n[line 2]\n");
    assert_eq!(outcome.exit_code, Some(70));
}

#[test]
fn superclass_error_points_at_the_superclass_name() {
    let outcome = run("var Base = 1;\nclass Sub <\n  Base {}");
    assert_eq!(outcome.stderr, "Superclass must be a class.\n[line 3]\n");
}

#[test]
fn methods_see_the_class_by_name() {
    assert_prints(
        r#"
        class Node {
          make() { return Node(); }
        }
        print Node().make();
        "#,
        "<class Node instance>\n",
    );
}
