mod selector;
